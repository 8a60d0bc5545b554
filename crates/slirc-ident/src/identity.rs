//! `nick!ident@host` identities.
//!
//! Sources that report a user's identity vary in completeness: a JOIN
//! prefix carries all three parts, a plain NAMES entry only the nickname.
//! [`Identity`] keeps the ident and host optional so that callers can tell a
//! confirmed identity from a bare nickname.

use std::convert::Infallible;
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// Return the nickname part of `nick!ident@host`.
///
/// Strings without a `!` are returned unchanged, so the function is safe to
/// apply to something that is already a bare nickname.
///
/// ```
/// use slirc_ident::extract_nick;
///
/// assert_eq!(extract_nick("foo!bar@baz"), "foo");
/// assert_eq!(extract_nick(extract_nick("foo!bar@baz")), "foo");
/// ```
pub fn extract_nick(source: &str) -> &str {
    match source.find('!') {
        Some(pos) => &source[..pos],
        None => source,
    }
}

/// Canonical textual form of a hostname.
///
/// IPv6 literals are rewritten in their compressed lowercase form so that
/// the same address always compares equal, whichever notation the server
/// used. Everything else is returned as-is.
pub fn canonical_host(host: &str) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(addr) => addr.to_string(),
        Err(_) => host.to_string(),
    }
}

/// A user identity as observed on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Identity {
    nick: String,
    ident: Option<String>,
    host: Option<String>,
}

impl Identity {
    /// Build an identity from its parts.
    pub fn new(nick: impl Into<String>, ident: Option<String>, host: Option<String>) -> Self {
        Self {
            nick: nick.into(),
            ident,
            host,
        }
    }

    /// An identity known only by its nickname.
    pub fn bare(nick: impl Into<String>) -> Self {
        Self::new(nick, None, None)
    }

    /// Parse `nick`, `nick!ident` or `nick!ident@host`.
    ///
    /// This is a lenient parser: empty parts are treated as unknown and the
    /// host is canonicalized with [`canonical_host`].
    pub fn parse(s: &str) -> Self {
        let Some((nick, rest)) = s.split_once('!') else {
            return Self::bare(s);
        };

        let (ident, host) = match rest.split_once('@') {
            Some((ident, host)) => (ident, Some(host)),
            None => (rest, None),
        };

        Self {
            nick: nick.to_string(),
            ident: (!ident.is_empty()).then(|| ident.to_string()),
            host: host.filter(|h| !h.is_empty()).map(canonical_host),
        }
    }

    /// The nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// The ident (user) part, if known.
    pub fn ident(&self) -> Option<&str> {
        self.ident.as_deref()
    }

    /// The host part, if known.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Whether the ident has been reported by the source.
    pub fn is_confirmed(&self) -> bool {
        self.ident.is_some()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ident.is_none() && self.host.is_none() {
            return f.write_str(&self.nick);
        }
        write!(
            f,
            "{}!{}@{}",
            self.nick,
            self.ident.as_deref().unwrap_or("*"),
            self.host.as_deref().unwrap_or("*")
        )
    }
}

impl FromStr for Identity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.to_string()
    }
}
