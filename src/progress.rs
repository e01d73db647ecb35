//! Durable learner progress.
//!
//! The engine reads and writes exactly one key in a key-value store; the
//! value is the JSON form of [`SavedProgress`]. Reads are tolerant (anything
//! unparsable is "no prior progress") and writes are best-effort — progress
//! loss degrades the experience but must never interrupt the session.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The single store key the engine uses.
pub const PROGRESS_KEY: &str = "modal_drill.progress";

/// Per-chapter completed count, matched by chapter id on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCompletion {
    pub id: String,
    pub completed: usize,
}

/// Durable view of the progression cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub current_chapter: usize,
    pub current_exercise: usize,
    pub chapters: Vec<ChapterCompletion>,
}

/// Key-value durable storage boundary.
///
/// Implementations live outside the engine (see the `progress_store` crate
/// for the file-backed one); errors cross this boundary as strings and are
/// swallowed by the callers here.
pub trait ProgressStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// Reads prior progress. Absent or corrupt data yields `None`.
#[must_use]
pub fn load_progress(store: &dyn ProgressStore) -> Option<SavedProgress> {
    let raw = store.get(PROGRESS_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(progress) => Some(progress),
        Err(error) => {
            warn!(key = PROGRESS_KEY, %error, "discarding unparsable saved progress");
            None
        }
    }
}

/// Writes progress, swallowing serialization and storage failures.
pub fn save_progress(store: &mut dyn ProgressStore, progress: &SavedProgress) {
    let serialized = match serde_json::to_string(progress) {
        Ok(serialized) => serialized,
        Err(error) => {
            warn!(key = PROGRESS_KEY, %error, "failed to serialize progress");
            return;
        }
    };

    if let Err(error) = store.set(PROGRESS_KEY, &serialized) {
        warn!(key = PROGRESS_KEY, %error, "failed to persist progress");
    }
}
