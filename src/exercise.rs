//! Chapter and exercise data model.
//!
//! Instances are produced by a loader (see the `exercise_pack` crate) and are
//! immutable afterwards, except for [`Chapter::record_completion`].

use std::collections::BTreeSet;

/// A single start→end text-transformation challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    /// Unique origin of this definition within the loaded pack.
    pub source_path: String,
    pub title: String,
    pub instructions: String,
    /// Keys the learner may use. Empty means unrestricted.
    pub allowed_keys: BTreeSet<String>,
    /// Keys to surface as hints, in presentation order.
    pub hint_keys: Vec<String>,
    pub start_text: String,
    pub end_text: String,
    /// The author's declared most-efficient solution, as individual keys.
    pub optimal_keys: Option<Vec<String>>,
}

impl Exercise {
    /// Returns the declared optimal solution as a single command string.
    #[must_use]
    pub fn optimal_sequence(&self) -> Option<String> {
        self.optimal_keys
            .as_ref()
            .map(|keys| keys.concat())
            .filter(|joined| !joined.is_empty())
    }

    /// Whether `key` is permitted by this exercise's restriction set.
    #[must_use]
    pub fn allows_key(&self, key: &str) -> bool {
        self.allowed_keys.is_empty() || self.allowed_keys.contains(key)
    }
}

/// An ordered group of exercises sharing a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    /// Id of the chapter that gates this one, if declared.
    pub prerequisite_id: Option<String>,
    pub exercises: Vec<Exercise>,
    completed_count: usize,
}

impl Chapter {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        prerequisite_id: Option<String>,
        exercises: Vec<Exercise>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            prerequisite_id,
            exercises,
            completed_count: 0,
        }
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    /// Counts one more completed exercise, never past the exercise count.
    pub fn record_completion(&mut self) {
        if self.completed_count < self.exercises.len() {
            self.completed_count += 1;
        }
    }

    /// Restores a persisted completed count, clamped into bounds.
    pub fn restore_completed_count(&mut self, completed: usize) {
        self.completed_count = completed.min(self.exercises.len());
    }
}
