//! Game configuration

use crate::letters::{LetterTable, ENGLISH, RUSSIAN};
use crate::types::{DEFAULT_MIN_WORD_LEN, DEFAULT_WORD_TIMEOUT_MS};

/// Letter distribution used for new pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    #[default]
    Russian,
    English,
}

impl Alphabet {
    pub fn table(&self) -> &'static LetterTable {
        match self {
            Alphabet::Russian => &RUSSIAN,
            Alphabet::English => &ENGLISH,
        }
    }

    /// Parse from a name or language code (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ru" | "russian" => Some(Alphabet::Russian),
            "en" | "english" => Some(Alphabet::English),
            _ => None,
        }
    }
}

/// Session settings. Fixed for the lifetime of a game; a restart reuses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for piece kinds and letters.
    pub seed: u64,
    /// Level a new game starts at (1 or more).
    pub start_level: u32,
    pub alphabet: Alphabet,
    /// Traces shorter than this are rejected without a dictionary lookup.
    pub min_word_len: usize,
    /// Idle time after which an open trace is finished; `None` disables.
    pub word_timeout_ms: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            start_level: 1,
            alphabet: Alphabet::default(),
            min_word_len: DEFAULT_MIN_WORD_LEN,
            word_timeout_ms: Some(DEFAULT_WORD_TIMEOUT_MS),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level.max(1);
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len;
        self
    }

    /// `0` disables the timeout.
    pub fn with_word_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.word_timeout_ms = (timeout_ms > 0).then_some(timeout_ms);
        self
    }
}
