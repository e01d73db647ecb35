//! Session controller.
//!
//! [`DrillApp`] is the single owner of all mutable session state
//! (progression cursor, command history, exercise phase, transient
//! feedback). Every side effect — touching the editing surface, scheduling
//! timers, persisting progress — goes through the [`DrillHost`] trait, so
//! the controller itself stays synchronous and deterministic.
//!
//! Timers are not cancellable; instead each scheduled timer carries a
//! freshly allocated [`TimerToken`] and the controller only honors a firing
//! whose token still matches the pending one. Loading a new exercise (reset,
//! auto-advance, manual navigation) forgets the pending tokens, which is
//! what makes a stale auto-advance firing after navigation harmless.

use crate::exercise::Chapter;
use crate::progress::SavedProgress;
use crate::progression::{ChapterProgress, ProgressionCursor};
use crate::tracker::{describe, CommandTracker};
use crate::verify::{check, Phase, Verdict};

pub type TimerToken = u64;

/// Delay between an accepted completion and loading the next exercise.
pub const AUTO_ADVANCE_DELAY_MS: u64 = 1200;
/// Display duration for transient feedback.
pub const FEEDBACK_DELAY_MS: u64 = 4000;

/// Transient user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Exercise solved and accepted; shown during the auto-advance delay.
    Success,
    /// Manual check on a buffer that does not match the target yet.
    NotYet,
    /// Reached the goal text, but not via the declared optimal command.
    TryOptimal {
        expected: String,
        description: String,
    },
    /// The requested chapter is still gated by the previous one.
    ChapterLocked,
    /// The final exercise of the final chapter has been completed.
    EndOfContent,
}

/// Side effects the controller may request.
///
/// The editing surface (buffer, cursor, undo stack) is an external
/// collaborator reached only through this trait.
pub trait DrillHost {
    fn buffer_text(&self) -> String;
    fn set_buffer(&mut self, text: &str);
    fn set_cursor(&mut self, line: usize, col: usize);
    fn clear_undo_history(&mut self);
    fn schedule_timer(&mut self, token: TimerToken, delay_ms: u64);
    fn persist_progress(&mut self, progress: &SavedProgress);
    fn request_render(&mut self);
}

#[derive(Debug)]
pub struct DrillApp {
    cursor: ProgressionCursor,
    tracker: CommandTracker,
    phase: Phase,
    feedback: Option<Feedback>,
    next_timer_token: TimerToken,
    pending_advance: Option<TimerToken>,
    pending_feedback_expiry: Option<TimerToken>,
}

impl DrillApp {
    /// Builds the controller over a loaded pack, restoring prior progress
    /// when available. Call [`DrillApp::start`] afterwards to push the first
    /// exercise onto the surface.
    #[must_use]
    pub fn new(chapters: Vec<Chapter>, saved: Option<&SavedProgress>) -> Self {
        let mut cursor = ProgressionCursor::new(chapters);
        if let Some(saved) = saved {
            cursor.restore(saved);
        }

        Self {
            cursor,
            tracker: CommandTracker::new(),
            phase: Phase::Active,
            feedback: None,
            next_timer_token: 1,
            pending_advance: None,
            pending_feedback_expiry: None,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &ProgressionCursor {
        &self.cursor
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Joined not-yet-resolved keys, for live display.
    #[must_use]
    pub fn pending_command_display(&self) -> String {
        self.tracker.pending_display()
    }

    /// Completed-command history, newest first.
    #[must_use]
    pub fn command_history(&self) -> Vec<&str> {
        self.tracker
            .history()
            .map(|record| record.command.as_str())
            .collect()
    }

    #[must_use]
    pub fn chapter_progress(&self) -> ChapterProgress {
        self.cursor.chapter_progress()
    }

    /// Pushes the current exercise onto the editing surface.
    pub fn start(&mut self, host: &mut dyn DrillHost) {
        self.load_current_exercise(host);
    }

    /// A buffer mutation was observed. Programmatic mutations (resets,
    /// exercise loads) must arrive with `user_initiated == false` and never
    /// trigger verification.
    pub fn on_content_changed(&mut self, user_initiated: bool, host: &mut dyn DrillHost) {
        if !user_initiated {
            return;
        }

        self.check_completion(host, false);
    }

    /// Explicit check request. A not-yet-solved buffer gets neutral feedback
    /// and no state changes.
    pub fn on_manual_check(&mut self, host: &mut dyn DrillHost) {
        self.check_completion(host, true);
    }

    /// Restores the exercise start text and forgets the current attempt:
    /// cursor to origin, surface undo history cleared, command history and
    /// pending keys cleared, pending timers invalidated.
    pub fn on_reset(&mut self, host: &mut dyn DrillHost) {
        self.load_current_exercise(host);
    }

    /// Manual forward navigation. Always honored regardless of completion
    /// state; a pending auto-advance for the exercise left behind dies with
    /// its token.
    pub fn on_next_exercise(&mut self, host: &mut dyn DrillHost) {
        if self.cursor.advance() {
            self.load_current_exercise(host);
        } else {
            host.request_render();
        }
    }

    /// Manual backward navigation; same contract as [`Self::on_next_exercise`].
    pub fn on_previous_exercise(&mut self, host: &mut dyn DrillHost) {
        if self.cursor.retreat() {
            self.load_current_exercise(host);
        } else {
            host.request_render();
        }
    }

    /// Jumps to the next chapter when its gate is satisfied.
    pub fn on_next_chapter(&mut self, host: &mut dyn DrillHost) {
        let target = self.cursor.chapter_index() + 1;
        if target >= self.cursor.chapters().len() {
            host.request_render();
            return;
        }

        if !self.cursor.is_chapter_unlocked(target) {
            self.set_feedback(Feedback::ChapterLocked, host);
            host.request_render();
            return;
        }

        self.cursor.jump_to_chapter(target);
        self.load_current_exercise(host);
    }

    /// Jumps to the previous chapter. Earlier chapters are never gated.
    pub fn on_previous_chapter(&mut self, host: &mut dyn DrillHost) {
        let current = self.cursor.chapter_index();
        if current == 0 {
            host.request_render();
            return;
        }

        self.cursor.jump_to_chapter(current - 1);
        self.load_current_exercise(host);
    }

    /// The surface's pending command buffer changed.
    pub fn on_pending_keys(&mut self, keys: &[String], host: &mut dyn DrillHost) {
        self.tracker.on_pending_keys(keys);
        host.request_render();
    }

    /// The surface resolved (or aborted) the pending command.
    pub fn on_pending_cleared(&mut self, timestamp: u64, host: &mut dyn DrillHost) {
        let title = self.cursor.current().map(|exercise| exercise.title.clone());
        self.tracker.on_pending_cleared(timestamp, title.as_deref());
        host.request_render();
    }

    /// A scheduled timer fired. Tokens that no longer match a pending timer
    /// belong to an exercise instance that has since been left; they are
    /// ignored.
    pub fn on_timer(&mut self, token: TimerToken, host: &mut dyn DrillHost) {
        if self.pending_advance == Some(token) {
            self.pending_advance = None;
            if self.cursor.advance() {
                self.load_current_exercise(host);
            } else {
                self.feedback = Some(Feedback::EndOfContent);
                host.request_render();
            }
            return;
        }

        if self.pending_feedback_expiry == Some(token) {
            self.pending_feedback_expiry = None;
            self.feedback = None;
            host.request_render();
        }
    }

    fn check_completion(&mut self, host: &mut dyn DrillHost, manual: bool) {
        // Already accepted: an auto-advance is pending and a second check
        // must not count the same completion again.
        if self.phase == Phase::Accepted {
            return;
        }

        let Some(exercise) = self.cursor.current() else {
            return;
        };

        match check(exercise, &host.buffer_text(), &self.tracker) {
            Verdict::NotSolved => {
                if manual {
                    self.set_feedback(Feedback::NotYet, host);
                    host.request_render();
                }
            }
            Verdict::Solved => self.accept_completion(host),
            Verdict::SolvedSuboptimal { expected } => {
                let description = describe(&expected);
                self.set_feedback(
                    Feedback::TryOptimal {
                        expected,
                        description,
                    },
                    host,
                );
                host.request_render();
            }
        }
    }

    fn accept_completion(&mut self, host: &mut dyn DrillHost) {
        self.phase = Phase::Accepted;
        self.cursor.record_completion();
        host.persist_progress(&self.cursor.snapshot());

        self.feedback = Some(Feedback::Success);
        self.pending_feedback_expiry = None;

        let token = self.allocate_token();
        self.pending_advance = Some(token);
        host.schedule_timer(token, AUTO_ADVANCE_DELAY_MS);
        host.request_render();
    }

    fn load_current_exercise(&mut self, host: &mut dyn DrillHost) {
        // Forgetting the tokens is the cancellation: a timer scheduled for
        // the previous exercise instance no longer matches anything.
        self.pending_advance = None;
        self.pending_feedback_expiry = None;
        self.phase = Phase::Active;
        self.feedback = None;
        self.tracker.clear_pending();
        self.tracker.clear_history();

        if let Some(exercise) = self.cursor.current() {
            host.set_buffer(&exercise.start_text);
            host.set_cursor(0, 0);
            host.clear_undo_history();
        }

        host.request_render();
    }

    fn set_feedback(&mut self, feedback: Feedback, host: &mut dyn DrillHost) {
        self.feedback = Some(feedback);
        let token = self.allocate_token();
        self.pending_feedback_expiry = Some(token);
        host.schedule_timer(token, FEEDBACK_DELAY_MS);
    }

    fn allocate_token(&mut self) -> TimerToken {
        let token = self.next_timer_token;
        self.next_timer_token += 1;
        token
    }
}
