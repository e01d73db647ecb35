//! Command buffer tracking.
//!
//! Translates the editing surface's pending-key pushes into discrete
//! completed commands and keeps a small newest-first history ring. The
//! surface cannot distinguish an executed command from one aborted via
//! escape when it clears its pending buffer; both are recorded alike —
//! history is advisory and verification only ever looks for a verbatim
//! match, so extra entries are harmless.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::LazyLock;

/// Most recent commands retained.
pub const HISTORY_LIMIT: usize = 5;

/// One fully-resolved logical editing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub command: String,
    pub timestamp: u64,
    /// Title of the exercise active when the command resolved.
    pub exercise_title: Option<String>,
}

static COMMAND_DESCRIPTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        map.insert("h", "move left");
        map.insert("j", "move down");
        map.insert("k", "move up");
        map.insert("l", "move right");
        map.insert("w", "next word");
        map.insert("b", "previous word");
        map.insert("e", "end of word");
        map.insert("0", "line start");
        map.insert("$", "line end");
        map.insert("gg", "first line");
        map.insert("G", "last line");
        map.insert("x", "delete character");
        map.insert("X", "delete character before cursor");
        map.insert("dd", "delete line");
        map.insert("dw", "delete word");
        map.insert("de", "delete to end of word");
        map.insert("d$", "delete to line end");
        map.insert("D", "delete to line end");
        map.insert("cw", "change word");
        map.insert("cc", "change line");
        map.insert("r", "replace character");
        map.insert("u", "undo");
        map.insert("p", "paste after");
        map.insert("P", "paste before");
        map.insert("yy", "yank line");
        map.insert("J", "join lines");
        map.insert("~", "toggle case");
        map
    });

/// Splits a leading decimal count off a command. `"3x"` → `(Some(3), "x")`,
/// `"dd"` → `(None, "dd")`. A bare digit run has no base and no count.
fn split_count(command: &str) -> (Option<u32>, &str) {
    let digits = command.len() - command.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || digits == command.len() {
        return (None, command);
    }

    match command[..digits].parse() {
        Ok(count) => (Some(count), &command[digits..]),
        Err(_) => (None, command),
    }
}

/// Human description of a command. Count-prefixed known commands render as
/// `"<description> × <count>"`; unknown commands pass through unchanged.
#[must_use]
pub fn describe(command: &str) -> String {
    if let Some(description) = COMMAND_DESCRIPTIONS.get(command) {
        return (*description).to_string();
    }

    let (count, base) = split_count(command);
    if let (Some(count), Some(description)) = (count, COMMAND_DESCRIPTIONS.get(base)) {
        return format!("{description} × {count}");
    }

    command.to_string()
}

/// Default efficiency heuristic: a count-prefixed command (a non-empty digit
/// run followed by one or more non-digit characters) is considered optimal.
/// A declared per-exercise optimal sequence always overrides this.
#[must_use]
pub fn is_optimal(command: &str) -> bool {
    let (count, base) = split_count(command);
    count.is_some() && !base.is_empty() && !base.chars().any(|c| c.is_ascii_digit())
}

/// Assembles pending keys into completed commands and retains the most
/// recent [`HISTORY_LIMIT`] of them, newest first.
#[derive(Debug, Clone, Default)]
pub struct CommandTracker {
    pending: Vec<String>,
    history: VecDeque<CommandRecord>,
}

impl CommandTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the transient pending buffer with the surface's current one.
    pub fn on_pending_keys(&mut self, keys: &[String]) {
        self.pending.clear();
        self.pending.extend_from_slice(keys);
    }

    /// Joined pending keys, for live display while a command accumulates.
    #[must_use]
    pub fn pending_display(&self) -> String {
        self.pending.concat()
    }

    /// The surface cleared its pending buffer: the accumulated sequence, if
    /// any, becomes one completed command at the head of history.
    pub fn on_pending_cleared(&mut self, timestamp: u64, exercise_title: Option<&str>) {
        if self.pending.is_empty() {
            return;
        }

        let command = std::mem::take(&mut self.pending).concat();
        self.history.push_front(CommandRecord {
            command,
            timestamp,
            exercise_title: exercise_title.map(str::to_string),
        });
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Completed commands, newest first.
    pub fn history(&self) -> impl Iterator<Item = &CommandRecord> {
        self.history.iter()
    }

    /// Whether `command` appears verbatim in history.
    #[must_use]
    pub fn contains_command(&self, command: &str) -> bool {
        self.history.iter().any(|record| record.command == command)
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|key| (*key).to_string()).collect()
    }

    #[test]
    fn pending_keys_are_exposed_joined() {
        let mut tracker = CommandTracker::new();
        tracker.on_pending_keys(&keys(&["3"]));
        assert_eq!(tracker.pending_display(), "3");
        tracker.on_pending_keys(&keys(&["3", "x"]));
        assert_eq!(tracker.pending_display(), "3x");
    }

    #[test]
    fn cleared_pending_becomes_newest_history_entry() {
        let mut tracker = CommandTracker::new();
        tracker.on_pending_keys(&keys(&["3", "x"]));
        tracker.on_pending_cleared(100, Some("Delete a character"));

        assert_eq!(tracker.pending_display(), "");
        let head = tracker.history().next().expect("one record");
        assert_eq!(head.command, "3x");
        assert_eq!(head.timestamp, 100);
        assert_eq!(head.exercise_title.as_deref(), Some("Delete a character"));
    }

    #[test]
    fn clearing_an_empty_pending_buffer_records_nothing() {
        let mut tracker = CommandTracker::new();
        tracker.on_pending_cleared(1, None);
        assert_eq!(tracker.history().count(), 0);
    }

    #[test]
    fn history_keeps_five_most_recent_newest_first() {
        let mut tracker = CommandTracker::new();
        for (index, command) in ["x", "dd", "w", "3x", "dw", "gg", "u"].iter().enumerate() {
            tracker.on_pending_keys(&keys(&[command]));
            tracker.on_pending_cleared(index as u64, None);
        }

        let commands: Vec<_> = tracker
            .history()
            .map(|record| record.command.as_str())
            .collect();
        assert_eq!(commands, ["u", "gg", "dw", "3x", "w"]);
    }

    #[test]
    fn contains_command_matches_verbatim_only() {
        let mut tracker = CommandTracker::new();
        tracker.on_pending_keys(&keys(&["x"]));
        tracker.on_pending_cleared(0, None);
        assert!(tracker.contains_command("x"));
        assert!(!tracker.contains_command("3x"));
    }

    #[test]
    fn describe_known_commands_and_counts() {
        assert_eq!(describe("dd"), "delete line");
        assert_eq!(describe("3x"), "delete character × 3");
        assert_eq!(describe("12w"), "next word × 12");
        assert_eq!(describe("zz"), "zz");
        // "0" is a motion, not a count prefix.
        assert_eq!(describe("0"), "line start");
    }

    #[test]
    fn optimality_heuristic_requires_count_prefix() {
        assert!(is_optimal("3x"));
        assert!(is_optimal("10dd"));
        assert!(!is_optimal("x"));
        assert!(!is_optimal("3"));
        assert!(!is_optimal(""));
        assert!(!is_optimal("3x3"));
    }
}
