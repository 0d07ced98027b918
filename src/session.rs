//! Keystroke-matching state machine for one attempt at one passage.
//!
//! Policy notes, fixed as part of the contract and covered by tests:
//! - Forgiving advance: a mismatched printable still moves the cursor
//!   forward; the miss is recorded in the error counter only.
//! - A backspace at position zero is a complete no-op: it neither bumps
//!   the backspace counter nor activates the session.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::Passage;
use crate::results::SessionSummary;
use crate::stats;

/// How a passage cell relates to the cursor, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Typed,
    Current,
    Upcoming,
}

/// One typing attempt from reset to completion or abandonment.
/// Replacing the value is the only way to reset; a replaced session
/// logs nothing.
#[derive(Debug, Clone)]
pub struct TypingSession {
    id: u64,
    passage: Passage,
    chars: Vec<char>,
    cursor: usize,
    correct_count: usize,
    error_count: usize,
    backspace_count: usize,
    elapsed_secs: u64,
    active: bool,
    finished: bool,
}

impl TypingSession {
    pub fn new(id: u64, passage: Passage) -> Self {
        let chars = passage.text.chars().collect();
        Self {
            id,
            passage,
            chars,
            cursor: 0,
            correct_count: 0,
            error_count: 0,
            backspace_count: 0,
            elapsed_secs: 0,
            active: false,
            finished: false,
        }
    }

    /// Feeds one key event through the state machine. Returns the session
    /// summary exactly once, on the transition into completion; the caller
    /// owns appending it to the result log.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<SessionSummary> {
        if self.finished || self.cursor >= self.chars.len() {
            return None;
        }

        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.backspace_count += 1;
                }
                None
            }
            KeyCode::Char(c) => {
                if key.modifiers.intersects(
                    KeyModifiers::CONTROL
                        | KeyModifiers::ALT
                        | KeyModifiers::SUPER
                        | KeyModifiers::META,
                ) {
                    return None;
                }

                self.active = true;

                if c == self.chars[self.cursor] {
                    self.correct_count += 1;
                } else {
                    self.error_count += 1;
                }
                self.cursor += 1;

                self.complete_if_done()
            }
            _ => None,
        }
    }

    /// One-second cadence from the event loop. The clock only runs while
    /// the session is active and at least one character stands typed, so
    /// backspacing to the very start pauses it.
    pub fn tick(&mut self) {
        if self.active && self.cursor > 0 {
            self.elapsed_secs += 1;
        }
    }

    fn complete_if_done(&mut self) -> Option<SessionSummary> {
        if self.cursor < self.chars.len() || self.finished {
            return None;
        }

        self.finished = true;
        self.active = false;

        Some(SessionSummary {
            id: self.id,
            passage_title: self.passage.title.clone(),
            passage_text: self.passage.text.clone(),
            elapsed_secs: self.elapsed_secs,
            wpm: self.wpm(),
            accuracy: self.accuracy(),
            error_count: self.error_count,
            backspace_count: self.backspace_count,
            completed_at: Local::now(),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn backspace_count(&self) -> usize {
        self.backspace_count
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn formatted_elapsed(&self) -> String {
        stats::format_time(self.elapsed_secs)
    }

    /// Running words-per-minute over the session so far.
    pub fn wpm(&self) -> u64 {
        stats::wpm(self.correct_count, self.elapsed_secs)
    }

    /// Running accuracy over the session so far.
    pub fn accuracy(&self) -> u64 {
        stats::accuracy(self.correct_count, self.error_count)
    }

    pub fn char_class(&self, index: usize) -> CharClass {
        if index < self.cursor {
            CharClass::Typed
        } else if index == self.cursor {
            CharClass::Current
        } else {
            CharClass::Upcoming
        }
    }

    /// The character the cursor expects next, if any remain.
    pub fn next_char(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }
}
