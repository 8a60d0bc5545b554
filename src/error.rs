//! Unified error handling for slirc-presence.
//!
//! Every query on the tracker either succeeds or fails with a
//! [`TrackerError`]. Errors fall into two kinds: the thing asked about is not
//! known (anymore), or the question itself was malformed.

use crate::state::Token;
use slirc_ident::IdentError;
use thiserror::Error;

/// Broad classification of a [`TrackerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown user, token or channel; includes tokens that have expired.
    NotFound,
    /// The request itself was malformed.
    InvalidInput,
}

/// Errors returned by the query surface of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("no such token: {0}")]
    NoSuchToken(Token),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("user {user} is not on {channel}")]
    NotOnChannel { channel: String, user: String },

    #[error("not a valid nick: {0:?}")]
    InvalidNick(String),

    #[error("no such information: {0}")]
    InvalidField(String),

    #[error("invalid mask: {0}")]
    InvalidPattern(#[from] IdentError),
}

impl TrackerError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchUser(_)
            | Self::NoSuchToken(_)
            | Self::NoSuchChannel(_)
            | Self::NotOnChannel { .. } => ErrorKind::NotFound,
            Self::InvalidNick(_) | Self::InvalidField(_) | Self::InvalidPattern(_) => {
                ErrorKind::InvalidInput
            }
        }
    }

    /// Shorthand for `kind() == ErrorKind::NotFound`.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Get a static error code string, used in daemon replies and log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchUser(_) => "no_such_user",
            Self::NoSuchToken(_) => "no_such_token",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotOnChannel { .. } => "not_on_channel",
            Self::InvalidNick(_) => "invalid_nick",
            Self::InvalidField(_) => "invalid_field",
            Self::InvalidPattern(_) => "invalid_pattern",
        }
    }
}

/// Result type for tracker queries.
pub type TrackerResult<T> = Result<T, TrackerError>;
