//! Chapter/exercise progression cursor.
//!
//! Owns the only mutable position state in the engine. Navigation clamps at
//! both ends and reports whether it actually moved; callers never observe an
//! out-of-bounds index while the chapter list is non-empty.

use crate::exercise::{Chapter, Exercise};
use crate::progress::{ChapterCompletion, SavedProgress};

/// Exercise-position summary for the active chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterProgress {
    /// 1-based position of the active exercise; 0 when the chapter is empty.
    pub current: usize,
    pub total: usize,
    /// `round(100 * completed / total)`; 0 when the chapter is empty.
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Position {
    chapter: usize,
    exercise: usize,
}

#[derive(Debug, Clone)]
pub struct ProgressionCursor {
    chapters: Vec<Chapter>,
    position: Position,
}

impl ProgressionCursor {
    #[must_use]
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters,
            position: Position::default(),
        }
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    pub fn chapter_index(&self) -> usize {
        self.position.chapter
    }

    #[must_use]
    pub fn exercise_index(&self) -> usize {
        self.position.exercise
    }

    /// Returns the active chapter, or `None` when no chapters loaded.
    #[must_use]
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.position.chapter)
    }

    /// Returns the active exercise, or `None` when no content is available.
    #[must_use]
    pub fn current(&self) -> Option<&Exercise> {
        self.current_chapter()
            .and_then(|chapter| chapter.exercises.get(self.position.exercise))
    }

    /// Moves to the next exercise, spilling into the next chapter when the
    /// current one is exhausted. Returns false (and stays put) at the very end.
    pub fn advance(&mut self) -> bool {
        let Some(chapter) = self.chapters.get(self.position.chapter) else {
            return false;
        };

        if self.position.exercise + 1 < chapter.exercises.len() {
            self.position.exercise += 1;
            return true;
        }

        if self.position.chapter + 1 < self.chapters.len() {
            self.position.chapter += 1;
            self.position.exercise = 0;
            return true;
        }

        false
    }

    /// Moves to the previous exercise, spilling onto the last exercise of the
    /// previous chapter. Returns false (and stays at (0, 0)) at the beginning.
    pub fn retreat(&mut self) -> bool {
        if self.chapters.is_empty() {
            return false;
        }

        if self.position.exercise > 0 {
            self.position.exercise -= 1;
            return true;
        }

        if self.position.chapter > 0 {
            self.position.chapter -= 1;
            self.position.exercise = self.chapters[self.position.chapter]
                .exercises
                .len()
                .saturating_sub(1);
            return true;
        }

        false
    }

    /// Jumps to `index` (clamped into bounds), resetting the exercise index.
    pub fn jump_to_chapter(&mut self, index: usize) {
        if self.chapters.is_empty() {
            return;
        }

        self.position.chapter = index.min(self.chapters.len() - 1);
        self.position.exercise = 0;
    }

    /// Chapter 0 is always unlocked; chapter N requires at least 80% of the
    /// previous chapter's exercises completed. The ratio is compared in
    /// integers (`completed * 5 >= total * 4`) so the boundary is exact.
    /// A gate chapter with zero exercises locks its successor.
    #[must_use]
    pub fn is_chapter_unlocked(&self, index: usize) -> bool {
        if index == 0 {
            return index < self.chapters.len();
        }

        let Some(gate) = self.chapters.get(index - 1) else {
            return false;
        };

        let total = gate.exercises.len();
        total > 0 && gate.completed_count() * 5 >= total * 4
    }

    /// Position and completion summary for the active chapter.
    #[must_use]
    pub fn chapter_progress(&self) -> ChapterProgress {
        let Some(chapter) = self.current_chapter() else {
            return ChapterProgress {
                current: 0,
                total: 0,
                percentage: 0,
            };
        };

        let total = chapter.exercises.len();
        if total == 0 {
            return ChapterProgress {
                current: 0,
                total: 0,
                percentage: 0,
            };
        }

        let percentage =
            ((chapter.completed_count() as f64 / total as f64) * 100.0).round() as u32;

        ChapterProgress {
            current: self.position.exercise + 1,
            total,
            percentage,
        }
    }

    /// Counts a completion against the active chapter.
    pub fn record_completion(&mut self) {
        if let Some(chapter) = self.chapters.get_mut(self.position.chapter) {
            chapter.record_completion();
        }
    }

    /// Captures the durable view of the cursor and per-chapter completions.
    #[must_use]
    pub fn snapshot(&self) -> SavedProgress {
        SavedProgress {
            current_chapter: self.position.chapter,
            current_exercise: self.position.exercise,
            chapters: self
                .chapters
                .iter()
                .map(|chapter| ChapterCompletion {
                    id: chapter.id.clone(),
                    completed: chapter.completed_count(),
                })
                .collect(),
        }
    }

    /// Restores a persisted snapshot. Completed counts are matched by chapter
    /// id (unknown ids ignored, values clamped); both indices are clamped
    /// into bounds, so a snapshot from a differently shaped pack still lands
    /// on valid content.
    pub fn restore(&mut self, saved: &SavedProgress) {
        for chapter in &mut self.chapters {
            if let Some(record) = saved.chapters.iter().find(|record| record.id == chapter.id)
            {
                chapter.restore_completed_count(record.completed);
            }
        }

        if self.chapters.is_empty() {
            return;
        }

        self.position.chapter = saved.current_chapter.min(self.chapters.len() - 1);
        let exercise_count = self.chapters[self.position.chapter].exercises.len();
        self.position.exercise = saved
            .current_exercise
            .min(exercise_count.saturating_sub(1));
    }
}
