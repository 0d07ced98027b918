use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Immutable snapshot taken once when a session reaches the end of its
/// passage. Owned by the [`ResultLog`] after that.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub id: u64,
    pub passage_title: String,
    pub passage_text: String,
    pub elapsed_secs: u64,
    pub wpm: u64,
    pub accuracy: u64,
    pub error_count: usize,
    pub backspace_count: usize,
    pub completed_at: DateTime<Local>,
}

/// In-memory log of completed sessions, newest first. Unbounded for the
/// process lifetime; nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct ResultLog {
    entries: VecDeque<SessionSummary>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, summary: SessionSummary) {
        self.entries.push_front(summary);
    }

    /// Entries in insertion order, most recent first.
    pub fn all(&self) -> impl Iterator<Item = &SessionSummary> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&SessionSummary> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
