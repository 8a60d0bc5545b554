//! The presence tracker.
//!
//! [`Tracker`] is a sans-IO state machine: the caller feeds it decoded
//! [`TrackerEvent`]s and performs the [`TrackerAction`]s it hands back
//! (send a line, arm a timer, disarm a timer). When an armed timer elapses
//! the caller reports it through [`Tracker::expire`].
//!
//! Each identity the tracker learns about is bound to a [`Token`]. A token
//! keeps resolving across nickname changes, ident/host confirmation and
//! channel churn, and stops resolving once the identity is forgotten or is
//! found to be a different person reusing the nickname.
//!
//! ```
//! use slirc_presence::{Tracker, TrackerEvent};
//! use slirc_presence::slirc_ident::Identity;
//!
//! let mut tracker = Tracker::default();
//! tracker.feed(TrackerEvent::Join {
//!     channel: "#rust".into(),
//!     source: Identity::parse("ferris!crab@example.org"),
//! });
//!
//! let token = tracker.start_tracking("Ferris").unwrap().token();
//! tracker.feed(TrackerEvent::Nick { old: "ferris".into(), new: "crab".into() });
//! assert_eq!(tracker.handle(token).to_string(), "crab");
//! ```

mod events;
mod handle;
mod handlers;
mod query;
mod reconcile;

pub use events::{Leave, TrackerAction, TrackerEvent};
pub use handle::{STALE_NICK, TokenHandle};
pub use query::{Info, InfoField, Subject};

use crate::caps::ServerCaps;
use crate::config::TrackerConfig;
use crate::state::{IdentityRecord, IdentityRegistry, MembershipTable, Sequence, TimerId, Token};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{trace, warn};

/// Tracks which users share channels with us and who they are.
#[derive(Debug)]
pub struct Tracker {
    registry: IdentityRegistry,
    members: MembershipTable,
    caps: ServerCaps,
    expire_after: Duration,
    timers: Sequence,
    timer_owners: HashMap<TimerId, Token>,
    actions: Vec<TrackerAction>,
}

impl Tracker {
    /// Create a tracker from configuration.
    ///
    /// An unparseable `prefix` falls back to `(ov)@+`; run
    /// [`validate`](crate::config::validate) first to reject it instead.
    pub fn new(config: &TrackerConfig) -> Self {
        let prefixes = config.prefix_map().unwrap_or_else(|error| {
            warn!(prefix = %config.prefix, %error, "ignoring configured prefix");
            Default::default()
        });
        let mut caps = ServerCaps::new(config.casemapping, prefixes);
        caps.set_userhost_names(config.userhost_in_names);
        Self::with_caps(caps, config.expire_after())
    }

    /// Create a tracker with explicit capabilities and grace period.
    pub fn with_caps(caps: ServerCaps, expire_after: Duration) -> Self {
        Self {
            registry: IdentityRegistry::new(),
            members: MembershipTable::new(),
            caps,
            expire_after,
            timers: Sequence::new(),
            timer_owners: HashMap::new(),
            actions: Vec::new(),
        }
    }

    pub fn caps(&self) -> &ServerCaps {
        &self.caps
    }

    /// How long an offline user stays resolvable.
    pub fn expire_after(&self) -> Duration {
        self.expire_after
    }

    /// Change the grace period. Timers already armed keep their delay.
    pub fn set_expire_after(&mut self, expire_after: Duration) {
        self.expire_after = expire_after;
    }

    /// Apply one event and return what the caller must do next.
    pub fn feed(&mut self, event: TrackerEvent) -> Vec<TrackerAction> {
        let span = crate::telemetry::spans::event(event.kind());
        let _enter = span.enter();
        self.dispatch(event);
        self.take_actions()
    }

    /// Report that `timer` elapsed.
    ///
    /// Returns whether an identity was forgotten. Timers that were cancelled,
    /// replaced, or whose identity is already gone are ignored.
    pub fn expire(&mut self, timer: TimerId) -> bool {
        let Some(token) = self.timer_owners.remove(&timer) else {
            trace!(%timer, "ignoring stale timer");
            return false;
        };
        match self.registry.record_mut(token) {
            Some(record) if record.pending_removal == Some(timer) => {
                record.pending_removal = None;
            }
            _ => {
                trace!(%timer, %token, "timer no longer armed for token");
                return false;
            }
        }
        self.forget_if_unseen(token)
    }

    /// Cancel every armed timer. Tracked identities are kept.
    pub fn shutdown(&mut self) -> Vec<TrackerAction> {
        for (timer, token) in std::mem::take(&mut self.timer_owners) {
            if let Some(record) = self.registry.record_mut(token) {
                record.pending_removal = None;
            }
            self.actions.push(TrackerAction::Cancel(timer));
        }
        self.take_actions()
    }

    /// Drain actions queued by direct calls such as
    /// [`update_user`](Self::update_user) or
    /// [`schedule_removal`](Self::schedule_removal).
    pub fn take_actions(&mut self) -> Vec<TrackerAction> {
        std::mem::take(&mut self.actions)
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The record bound to `token`, if it is still live.
    pub fn record(&self, token: Token) -> Option<&IdentityRecord> {
        self.registry.record(token)
    }

    /// Every live identity, in allocation order.
    pub fn users(&self) -> impl Iterator<Item = (Token, &IdentityRecord)> {
        self.registry.iter()
    }

    /// Channels with at least one known member.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.members.channels()
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}
