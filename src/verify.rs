//! Pure completion verification.
//!
//! The controller in [`crate::app`] owns all side effects; this module only
//! computes verdicts from immutable inputs so the decision logic stays
//! trivially testable.

use crate::exercise::Exercise;
use crate::tracker::CommandTracker;

/// Lifecycle of the active exercise instance. The transient
/// "solved, pending optimal check" stage resolves synchronously inside one
/// verification pass, so only the stable states are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Editable; completion checks run.
    Active,
    /// Completion accepted; auto-advance pending. Further checks are ignored.
    Accepted,
}

/// Outcome of one verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Buffer does not match the target text.
    NotSolved,
    /// Buffer matches and the completion is accepted.
    Solved,
    /// Buffer matches, but the declared optimal command was not used.
    SolvedSuboptimal { expected: String },
}

/// Compares `buffer_text` against the exercise target (both trimmed) and, on
/// a match, consults command history for the declared optimal sequence.
/// Without a declared sequence every solve is accepted.
#[must_use]
pub fn check(exercise: &Exercise, buffer_text: &str, tracker: &CommandTracker) -> Verdict {
    if buffer_text.trim() != exercise.end_text.trim() {
        return Verdict::NotSolved;
    }

    match exercise.optimal_sequence() {
        None => Verdict::Solved,
        Some(expected) if tracker.contains_command(&expected) => Verdict::Solved,
        Some(expected) => Verdict::SolvedSuboptimal { expected },
    }
}
