//! Exercise progression and command-verification engine for an interactive
//! modal-editing tutor.
//!
//! The editing surface itself (buffer mutation, cursor rendering,
//! key-to-motion interpretation) is an external collaborator: outgoing
//! effects cross the [`DrillHost`] trait, incoming events arrive as
//! [`DrillApp`] `on_*` callbacks. Everything in between — chapters,
//! progression, command history, optimal-solution verification, durable
//! progress — lives here and is deterministic.
//!
//! # Public API Overview
//! - Load [`Chapter`]/[`Exercise`] content (see the `exercise_pack` crate)
//!   and drive it through [`DrillApp`].
//! - Inspect position and unlock state via [`ProgressionCursor`].
//! - Observe assembled commands via [`CommandTracker`] and [`describe`].
//! - Persist progress through any [`ProgressStore`] (file-backed
//!   implementation in the `progress_store` crate).

pub mod app;
pub mod exercise;
pub mod progress;
pub mod progression;
pub mod tracker;
pub mod verify;

/// Session controller and its side-effect boundary.
pub use crate::app::{
    DrillApp, DrillHost, Feedback, TimerToken, AUTO_ADVANCE_DELAY_MS, FEEDBACK_DELAY_MS,
};

/// Content model.
pub use crate::exercise::{Chapter, Exercise};

/// Durable progress.
pub use crate::progress::{
    load_progress, save_progress, ChapterCompletion, ProgressStore, SavedProgress, PROGRESS_KEY,
};

/// Progression state.
pub use crate::progression::{ChapterProgress, ProgressionCursor};

/// Command assembly and history.
pub use crate::tracker::{describe, is_optimal, CommandRecord, CommandTracker, HISTORY_LIMIT};

/// Verification primitives.
pub use crate::verify::{check, Phase, Verdict};
