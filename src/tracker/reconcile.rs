//! Identity reconciliation: binding sightings to tokens and forgetting them.

use super::{Leave, Tracker, TrackerAction};
use crate::state::{IdentityRecord, Token};
use slirc_ident::extract_nick;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

impl Tracker {
    /// Token currently indexed under `nick` (a bare nick or full mask).
    pub(crate) fn lookup(&self, nick: &str) -> Option<Token> {
        self.registry
            .find(&self.caps.normalize(extract_nick(nick)))
    }

    /// Record a sighting of `nick`, optionally with a confirmed ident and host.
    ///
    /// Returns the token now bound to the nickname. That is a new token when
    /// the nickname was unknown, or when a confirmed sighting disagrees with
    /// the identity already on record: the old holder is forgotten and its
    /// token stops resolving.
    ///
    /// Any pending removal of the nickname's token is cancelled. A sighting
    /// without an ident leaves a confirmed record untouched.
    pub fn update_user(&mut self, nick: &str, ident: Option<&str>, host: Option<&str>) -> Token {
        let key = self.caps.normalize(nick);
        let Some(token) = self.registry.find(&key) else {
            return self
                .registry
                .allocate(key, IdentityRecord::new(nick, ident, host));
        };
        self.cancel_removal(token);

        let Some(record) = self.registry.record_mut(token) else {
            return self
                .registry
                .allocate(key, IdentityRecord::new(nick, ident, host));
        };

        if !record.is_confirmed() {
            *record = IdentityRecord::new(nick, ident, host);
            return token;
        }
        if ident.is_none() {
            return token;
        }
        if record.same_identity(ident, host) {
            record.nick = nick.to_string();
            record.online = true;
            return token;
        }

        let previous = record.mask();
        self.destroy(token);
        let replacement = self
            .registry
            .allocate(key, IdentityRecord::new(nick, ident, host));
        info!(
            old = %token,
            new = %replacement,
            %previous,
            "different identity behind nickname, token replaced"
        );
        replacement
    }

    /// Forget `nick` unless it still shares a channel with us.
    ///
    /// Returns whether the identity was forgotten.
    pub fn remove_user(&mut self, nick: &str) -> bool {
        let Some(token) = self.lookup(nick) else {
            return false;
        };
        self.cancel_removal(token);
        self.forget_if_unseen(token)
    }

    /// Forget `nick` after `delay`, unless it is sighted again in between.
    ///
    /// A zero delay removes immediately. Re-scheduling replaces the previous
    /// timer.
    pub fn schedule_removal(&mut self, nick: &str, delay: Duration) {
        if let Some(token) = self.lookup(nick) {
            self.schedule_token_removal(token, delay);
        }
    }

    /// Move `old`'s token to `new`.
    ///
    /// A different identity indexed under `new` is evicted first. The
    /// renamed identity keeps its ident, host, channels and any pending
    /// removal.
    pub fn propagate_rename(&mut self, old: &str, new: &str) {
        let Some(token) = self.lookup(old) else {
            trace!(old, new, "rename of untracked user");
            return;
        };
        let key = self.caps.normalize(new);

        if let Some(squatter) = self.registry.find(&key).filter(|&held| held != token) {
            self.cancel_removal(squatter);
            if !self.forget_if_unseen(squatter) {
                warn!(
                    token = %squatter,
                    nick = new,
                    "nickname taken while its holder still shares channels, dropping holder"
                );
                self.destroy(squatter);
            }
        }

        self.registry.rename(token, key, new);
        debug!(%token, old, new, "renamed");
    }

    pub(super) fn handle_leaving(&mut self, nick: &str, leave: Leave<'_>) {
        let Some(token) = self.lookup(nick) else {
            trace!(nick, ?leave, "untracked user left");
            return;
        };
        match leave {
            Leave::Quit => self.members.leave_all(token),
            Leave::Part(channel) | Leave::Kick(channel) => {
                self.members.leave(channel, token);
            }
        }
        if self.members.has_any(token) {
            return;
        }
        if let Some(record) = self.registry.record_mut(token) {
            record.online = false;
        }
        self.schedule_token_removal(token, self.expire_after);
    }

    pub(super) fn schedule_token_removal(&mut self, token: Token, delay: Duration) {
        self.cancel_removal(token);
        if delay.is_zero() {
            self.forget_if_unseen(token);
            return;
        }
        let timer = self.timers.next_timer();
        let Some(record) = self.registry.record_mut(token) else {
            return;
        };
        record.pending_removal = Some(timer);
        self.timer_owners.insert(timer, token);
        self.actions.push(TrackerAction::Schedule { timer, delay });
        debug!(%token, %timer, ?delay, "removal scheduled");
    }

    /// Disarm the token's removal timer, if any.
    pub(super) fn cancel_removal(&mut self, token: Token) {
        let Some(timer) = self
            .registry
            .record_mut(token)
            .and_then(|record| record.pending_removal.take())
        else {
            return;
        };
        self.timer_owners.remove(&timer);
        self.actions.push(TrackerAction::Cancel(timer));
        trace!(%token, %timer, "removal cancelled");
    }

    pub(super) fn forget_if_unseen(&mut self, token: Token) -> bool {
        if self.members.has_any(token) {
            trace!(%token, "still shares channels, kept");
            return false;
        }
        self.destroy(token);
        true
    }

    /// Drop a token with everything bound to it.
    pub(super) fn destroy(&mut self, token: Token) {
        self.cancel_removal(token);
        self.members.leave_all(token);
        if let Some(record) = self.registry.destroy(token) {
            debug!(%token, nick = %record.nick, "forgot user");
        }
    }

    /// Re-index every nickname under the current casemapping.
    pub(super) fn rekey(&mut self) {
        let caps = &self.caps;
        let orphans = self.registry.rekey(|nick| caps.normalize(nick));
        for token in orphans {
            warn!(%token, "nickname collides under new casemapping, dropping");
            self.destroy(token);
        }
    }
}
