//! Borrowed views of a token.

use super::{Info, InfoField, Tracker};
use crate::error::{TrackerError, TrackerResult};
use crate::state::{IdentityRecord, Token};
use std::fmt;

/// What a [`TokenHandle`] displays as once its identity is forgotten.
pub const STALE_NICK: &str = "???";

/// A token paired with the tracker that issued it.
///
/// Handles borrow the tracker, so they cannot outlive a batch of events.
/// Keep the [`Token`] itself across events and re-attach it with
/// [`Tracker::handle`].
#[derive(Clone, Copy)]
pub struct TokenHandle<'a> {
    tracker: &'a Tracker,
    token: Token,
}

impl<'a> TokenHandle<'a> {
    pub(super) fn new(tracker: &'a Tracker, token: Token) -> Self {
        Self { tracker, token }
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// The record, if the token is still live.
    pub fn try_resolve(&self) -> Option<&'a IdentityRecord> {
        self.tracker.record(self.token)
    }

    pub fn is_stale(&self) -> bool {
        self.try_resolve().is_none()
    }

    pub fn nick(&self) -> TrackerResult<String> {
        self.record().map(|record| record.nick.clone())
    }

    pub fn ident(&self) -> TrackerResult<Option<String>> {
        self.record().map(|record| record.ident.clone())
    }

    pub fn host(&self) -> TrackerResult<Option<String>> {
        self.record().map(|record| record.host.clone())
    }

    pub fn mask(&self) -> TrackerResult<String> {
        self.record().map(IdentityRecord::mask)
    }

    pub fn is_on(&self) -> TrackerResult<bool> {
        self.record().map(|record| record.online)
    }

    /// Any field, as [`Tracker::info`] would return it.
    pub fn info(&self, field: InfoField) -> TrackerResult<Info> {
        self.tracker.info(self.token, field)
    }

    fn record(&self) -> TrackerResult<&'a IdentityRecord> {
        self.try_resolve()
            .ok_or(TrackerError::NoSuchToken(self.token))
    }
}

impl fmt::Display for TokenHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_resolve() {
            Some(record) => f.write_str(&record.nick),
            None => f.write_str(STALE_NICK),
        }
    }
}

impl fmt::Debug for TokenHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenHandle")
            .field("token", &self.token)
            .field("record", &self.try_resolve())
            .finish()
    }
}

impl PartialEq for TokenHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tracker, other.tracker) && self.token == other.token
    }
}

impl Eq for TokenHandle<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::TrackerEvent;
    use slirc_ident::Identity;
    use std::time::Duration;

    #[test]
    fn test_handle_follows_renames() {
        let mut t = Tracker::default();
        t.feed(TrackerEvent::Join {
            channel: "#test".into(),
            source: Identity::parse("foo!ident@host"),
        });
        let token = t.start_tracking("foo").unwrap().token();
        t.feed(TrackerEvent::Nick {
            old: "foo".into(),
            new: "bar".into(),
        });

        let handle = t.handle(token);
        assert_eq!(handle.to_string(), "bar");
        assert_eq!(handle.nick().unwrap(), "bar");
        assert_eq!(handle.ident().unwrap().as_deref(), Some("ident"));
        assert_eq!(handle.host().unwrap().as_deref(), Some("host"));
        assert_eq!(handle.mask().unwrap(), "bar!ident@host");
        assert!(handle.is_on().unwrap());
        assert_eq!(handle.info(InfoField::Nick), Ok(Info::Nick("bar".into())));
        assert_eq!(handle, t.start_tracking("BAR").unwrap());
    }

    #[test]
    fn test_stale_handle() {
        let mut t = Tracker::with_caps(Default::default(), Duration::ZERO);
        t.feed(TrackerEvent::Join {
            channel: "#test".into(),
            source: Identity::parse("foo!ident@host"),
        });
        let token = t.start_tracking("foo").unwrap().token();
        t.feed(TrackerEvent::Quit { nick: "foo".into() });

        let handle = t.handle(token);
        assert!(handle.is_stale());
        assert_eq!(handle.to_string(), STALE_NICK);
        assert_eq!(handle.nick(), Err(TrackerError::NoSuchToken(token)));
    }
}
