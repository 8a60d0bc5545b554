//! Error types for identity helpers.

use thiserror::Error;

/// Convenience type alias for Results using [`IdentError`].
pub type Result<T, E = IdentError> = std::result::Result<T, E>;

/// Errors raised while interpreting server-provided identity data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentError {
    /// `CASEMAPPING` value this crate does not know how to apply.
    #[error("unknown casemapping: {0}")]
    UnknownCasemapping(String),

    /// `PREFIX` value that is not of the form `(modes)symbols`.
    #[error("malformed PREFIX value: {0:?}")]
    MalformedPrefix(String),

    /// `PREFIX` value whose mode and symbol lists differ in length.
    #[error("PREFIX {value:?} pairs {modes} modes with {symbols} symbols")]
    PrefixLengthMismatch {
        /// The offending value.
        value: String,
        /// Number of mode letters.
        modes: usize,
        /// Number of status symbols.
        symbols: usize,
    },

    /// Hostmask that could not be compiled into a matcher.
    #[error("invalid hostmask {mask:?}: {reason}")]
    InvalidMask {
        /// The mask as given by the caller.
        mask: String,
        /// Why compilation failed.
        reason: String,
    },
}
