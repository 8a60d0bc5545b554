//! Token and timer identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle on one tracked identity.
///
/// Tokens survive nickname changes and are never reused: once a token has
/// been destroyed, no future identity will ever be issued the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(u64);

impl Token {
    /// Rebuild a token from a value previously obtained with [`Token::get`].
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// The raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle on a scheduled removal timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(u64);

impl TimerId {
    /// The raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Monotonic counter issuing tokens and timer handles.
///
/// Not thread-safe; each tracker owns its own.
#[derive(Debug, Default)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    /// Create a sequence starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        let n = self.next;
        self.next += 1;
        n
    }

    /// Issue the next token.
    pub fn next_token(&mut self) -> Token {
        Token(self.bump())
    }

    /// Issue the next timer handle.
    pub fn next_timer(&mut self) -> TimerId {
        TimerId(self.bump())
    }
}
