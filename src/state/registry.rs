//! Identity registry: token allocation and the nickname index.

use super::{IdentityRecord, Sequence, Token};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug)]
struct Entry {
    /// Normalized nickname this token is indexed under.
    key: String,
    record: IdentityRecord,
}

/// Owns the token ↔ nickname mapping and the per-token records.
///
/// Exactly one token is indexed under any normalized nickname. Keys are
/// computed by the caller (the registry does not know the casemapping).
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    sequence: Sequence,
    nicks: HashMap<String, Token>,
    entries: HashMap<Token, Entry>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `key` and install `record` under it.
    ///
    /// Any token previously indexed under `key` loses its index entry; callers
    /// destroy it first.
    pub fn allocate(&mut self, key: String, record: IdentityRecord) -> Token {
        let token = self.sequence.next_token();
        debug!(%token, nick = %record.nick, "allocated token");
        self.nicks.insert(key.clone(), token);
        self.entries.insert(token, Entry { key, record });
        token
    }

    /// Token indexed under a normalized nickname.
    pub fn find(&self, key: &str) -> Option<Token> {
        self.nicks.get(key).copied()
    }

    pub fn contains(&self, token: Token) -> bool {
        self.entries.contains_key(&token)
    }

    pub fn record(&self, token: Token) -> Option<&IdentityRecord> {
        self.entries.get(&token).map(|e| &e.record)
    }

    pub fn record_mut(&mut self, token: Token) -> Option<&mut IdentityRecord> {
        self.entries.get_mut(&token).map(|e| &mut e.record)
    }

    /// Normalized nickname a token is indexed under.
    pub fn key_of(&self, token: Token) -> Option<&str> {
        self.entries.get(&token).map(|e| e.key.as_str())
    }

    /// Move a token to a new nickname. Ident and host are left alone.
    ///
    /// Returns false if the token does not exist.
    pub fn rename(&mut self, token: Token, key: String, nick: &str) -> bool {
        let Some(entry) = self.entries.get_mut(&token) else {
            return false;
        };
        if self.nicks.get(&entry.key) == Some(&token) {
            self.nicks.remove(&entry.key);
        }
        self.nicks.insert(key.clone(), token);
        entry.key = key;
        entry.record.nick = nick.to_string();
        true
    }

    /// Remove a token for good.
    pub fn destroy(&mut self, token: Token) -> Option<IdentityRecord> {
        let entry = self.entries.remove(&token)?;
        if self.nicks.get(&entry.key) == Some(&token) {
            self.nicks.remove(&entry.key);
        }
        Some(entry.record)
    }

    /// Recompute every index key, e.g. after the casemapping changed.
    ///
    /// Returns the tokens that lost their key to a newer token that folds to
    /// the same nickname; they are no longer indexed and should be destroyed.
    pub fn rekey(&mut self, mut normalize: impl FnMut(&str) -> String) -> Vec<Token> {
        let mut tokens: Vec<Token> = self.entries.keys().copied().collect();
        tokens.sort_unstable();

        let mut orphans = Vec::new();
        self.nicks.clear();
        for token in tokens {
            let Some(entry) = self.entries.get_mut(&token) else {
                continue;
            };
            entry.key = normalize(&entry.record.nick);
            if let Some(older) = self.nicks.insert(entry.key.clone(), token) {
                orphans.push(older);
            }
        }
        orphans
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all records, in token order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &IdentityRecord)> {
        let mut tokens: Vec<Token> = self.entries.keys().copied().collect();
        tokens.sort_unstable();
        tokens
            .into_iter()
            .filter_map(|t| self.entries.get(&t).map(|e| (t, &e.record)))
    }
}
