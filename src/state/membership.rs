//! Channel membership and per-channel status.

use super::Token;
use std::collections::{BTreeMap, BTreeSet};

/// Status mode letters a member holds on one channel (e.g. `{'o'}`).
pub type PrivilegeSet = BTreeSet<char>;

/// Members of one channel, keyed by token.
///
/// Tokens are issued in observation order, so iteration follows the order in
/// which members were first seen.
pub type Members = BTreeMap<Token, PrivilegeSet>;

/// Owns the channel → token → privileges mapping.
///
/// Presence of a token in a channel's map means membership, whether or not
/// its privilege set is empty. A channel stays in the table once seen, even
/// after its last member left.
#[derive(Debug, Default)]
pub struct MembershipTable {
    channels: BTreeMap<String, Members>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member with no privileges, resetting any previous status.
    pub fn join(&mut self, channel: &str, token: Token) {
        self.set(channel, token, PrivilegeSet::new());
    }

    /// Add or overwrite a member together with its privileges.
    pub fn set(&mut self, channel: &str, token: Token, privileges: PrivilegeSet) {
        self.channels
            .entry(channel.to_string())
            .or_default()
            .insert(token, privileges);
    }

    /// Remove one membership. Returns whether the token was a member.
    pub fn leave(&mut self, channel: &str, token: Token) -> bool {
        self.channels
            .get_mut(channel)
            .is_some_and(|members| members.remove(&token).is_some())
    }

    /// Remove a token from every channel.
    pub fn leave_all(&mut self, token: Token) {
        for members in self.channels.values_mut() {
            members.remove(&token);
        }
    }

    /// Add a status letter. No-op unless the token is a member.
    pub fn grant(&mut self, channel: &str, token: Token, mode: char) -> bool {
        match self.channels.get_mut(channel).and_then(|m| m.get_mut(&token)) {
            Some(privileges) => privileges.insert(mode),
            None => false,
        }
    }

    /// Remove a status letter. Absent letters and non-members are ignored.
    pub fn revoke(&mut self, channel: &str, token: Token, mode: char) -> bool {
        match self.channels.get_mut(channel).and_then(|m| m.get_mut(&token)) {
            Some(privileges) => privileges.remove(&mode),
            None => false,
        }
    }

    /// Channels the token is a member of, in channel-name order.
    pub fn common_channels(&self, token: Token) -> Vec<String> {
        self.channels
            .iter()
            .filter(|(_, members)| members.contains_key(&token))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Whether the token is a member of any channel.
    pub fn has_any(&self, token: Token) -> bool {
        self.channels.values().any(|m| m.contains_key(&token))
    }

    pub fn has_channel(&self, channel: &str) -> bool {
        self.channels.contains_key(channel)
    }

    pub fn is_member(&self, channel: &str, token: Token) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|members| members.contains_key(&token))
    }

    pub fn members(&self, channel: &str) -> Option<&Members> {
        self.channels.get(channel)
    }

    pub fn privileges(&self, channel: &str, token: Token) -> Option<&PrivilegeSet> {
        self.channels.get(channel)?.get(&token)
    }

    /// Names of every channel in the table.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }
}
