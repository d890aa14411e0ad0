//! Word module - traced letter paths and dictionary lookups
//!
//! A trace is an ordered list of board cells built one pointer sample at a
//! time. The tracer only enforces the path rules (lettered cells, no
//! revisits, 4-directional steps); whether the resulting word counts is up to
//! a [`Dictionary`].
//!
//! State machine: Idle (empty path) -> Tracing (one or more cells) -> Idle on
//! [`WordTracer::finish`] or [`WordTracer::cancel`].

use std::collections::HashSet;

use crate::board::Board;
use crate::types::PathPosition;

/// Word lookup used to accept or reject a finished trace.
pub trait Dictionary {
    fn contains(&self, word: &str) -> bool;
}

/// Accepts every word.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyWord;

impl Dictionary for AnyWord {
    fn contains(&self, _word: &str) -> bool {
        true
    }
}

/// In-memory word list; lookups ignore case.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

/// A finished trace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TracedWord {
    pub word: String,
    pub path: Vec<PathPosition>,
}

impl TracedWord {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Length in letters (not bytes).
    pub fn len(&self) -> usize {
        self.path.len()
    }
}

/// Incrementally built letter path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTracer {
    path: Vec<PathPosition>,
}

impl WordTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[PathPosition] {
        &self.path
    }

    pub fn is_tracing(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn contains(&self, x: i8, y: i8) -> bool {
        self.path.iter().any(|p| p.same_cell(x, y))
    }

    /// Letters traced so far.
    pub fn current_word(&self) -> String {
        self.path.iter().map(|p| p.letter).collect()
    }

    /// Begin a new trace at (x, y).
    ///
    /// A cell without a letter leaves the tracer untouched and returns the
    /// current path, empty when idle. Otherwise any previous trace is replaced.
    pub fn start(&mut self, board: &Board, x: i8, y: i8) -> &[PathPosition] {
        let Some(letter) = board.letter_at(x, y) else {
            return &self.path;
        };
        self.path.clear();
        self.path.push(PathPosition { x, y, letter });
        &self.path
    }

    /// Append (x, y) to the trace.
    ///
    /// Rejected with `None`, leaving the path as it was, when no trace is in
    /// progress, the cell has no letter, the cell is already on the path, or
    /// it is not a 4-neighbour of the last cell.
    pub fn extend(&mut self, board: &Board, x: i8, y: i8) -> Option<&[PathPosition]> {
        let last = *self.path.last()?;
        let letter = board.letter_at(x, y)?;
        if self.contains(x, y) {
            return None;
        }

        let next = PathPosition { x, y, letter };
        if !last.is_adjacent(&next) {
            return None;
        }

        self.path.push(next);
        Some(&self.path)
    }

    /// End the trace and return the word; the tracer is idle afterwards.
    pub fn finish(&mut self) -> TracedWord {
        let path = std::mem::take(&mut self.path);
        let word = path.iter().map(|p| p.letter).collect();
        TracedWord { word, path }
    }

    /// Drop the trace without producing a word.
    pub fn cancel(&mut self) {
        self.path.clear();
    }
}
