//! Read-only queries over tracked identities and channels.

use super::{TokenHandle, Tracker};
use crate::error::{TrackerError, TrackerResult};
use crate::state::{IdentityRecord, PrivilegeSet, Token};
use serde::Serialize;
use slirc_ident::{HostmaskPattern, extract_nick};
use std::fmt;
use std::str::FromStr;

/// Who a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'a> {
    /// A token obtained earlier; stops resolving once the identity is gone.
    Token(Token),
    /// Whoever currently holds this nickname (a bare nick or full mask).
    Nick(&'a str),
}

impl From<Token> for Subject<'_> {
    fn from(token: Token) -> Self {
        Subject::Token(token)
    }
}

impl<'a> From<&'a str> for Subject<'a> {
    fn from(nick: &'a str) -> Self {
        Subject::Nick(nick)
    }
}

impl<'a> From<&'a String> for Subject<'a> {
    fn from(nick: &'a String) -> Self {
        Subject::Nick(nick)
    }
}

impl From<&TokenHandle<'_>> for Subject<'_> {
    fn from(handle: &TokenHandle<'_>) -> Self {
        Subject::Token(handle.token())
    }
}

impl From<TokenHandle<'_>> for Subject<'_> {
    fn from(handle: TokenHandle<'_>) -> Self {
        Subject::Token(handle.token())
    }
}

/// Which piece of information [`Tracker::info`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    Nick,
    Ident,
    Host,
    /// `nick!ident@host` with `*` for unknown parts.
    Mask,
    /// Whether the user currently shares a channel or is online.
    IsOn,
}

impl InfoField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nick => "nick",
            Self::Ident => "ident",
            Self::Host => "host",
            Self::Mask => "mask",
            Self::IsOn => "is_on",
        }
    }
}

impl fmt::Display for InfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoField {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nick" => Ok(Self::Nick),
            "ident" | "user" => Ok(Self::Ident),
            "host" => Ok(Self::Host),
            "mask" => Ok(Self::Mask),
            "is_on" | "ison" => Ok(Self::IsOn),
            _ => Err(TrackerError::InvalidField(s.to_string())),
        }
    }
}

/// A value returned by [`Tracker::info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Info {
    Nick(String),
    Ident(Option<String>),
    Host(Option<String>),
    Mask(String),
    IsOn(bool),
}

impl Info {
    fn extract(record: &IdentityRecord, field: InfoField) -> Self {
        match field {
            InfoField::Nick => Info::Nick(record.nick.clone()),
            InfoField::Ident => Info::Ident(record.ident.clone()),
            InfoField::Host => Info::Host(record.host.clone()),
            InfoField::Mask => Info::Mask(record.mask()),
            InfoField::IsOn => Info::IsOn(record.online),
        }
    }
}

impl Tracker {
    /// Resolve a subject to a live token.
    pub fn resolve<'a>(&self, subject: impl Into<Subject<'a>>) -> TrackerResult<Token> {
        match subject.into() {
            Subject::Token(token) if self.registry.contains(token) => Ok(token),
            Subject::Token(token) => Err(TrackerError::NoSuchToken(token)),
            Subject::Nick(nick) => self
                .lookup(nick)
                .ok_or_else(|| TrackerError::NoSuchUser(nick.to_string())),
        }
    }

    /// A handle to `token`. The token is not checked; a stale handle
    /// reports [`NoSuchToken`](TrackerError::NoSuchToken) from its accessors.
    pub fn handle(&self, token: Token) -> TokenHandle<'_> {
        TokenHandle::new(self, token)
    }

    /// A handle that follows the identity currently using `who`.
    pub fn start_tracking(&self, who: &str) -> TrackerResult<TokenHandle<'_>> {
        let nick = extract_nick(who);
        if nick.is_empty() || nick.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TrackerError::InvalidNick(who.to_string()));
        }
        let token = self.resolve(nick)?;
        Ok(self.handle(token))
    }

    /// One piece of information about a subject.
    pub fn info<'a>(&self, subject: impl Into<Subject<'a>>, field: InfoField) -> TrackerResult<Info> {
        let token = self.resolve(subject)?;
        let record = self
            .registry
            .record(token)
            .ok_or(TrackerError::NoSuchToken(token))?;
        Ok(Info::extract(record, field))
    }

    /// Whether `nick` is on `channel`, or with no nick, whether we know
    /// anyone on `channel` at all.
    pub fn is_on(&self, channel: &str, nick: Option<&str>) -> bool {
        match nick {
            None => self.members.has_channel(channel),
            Some(nick) => self
                .lookup(nick)
                .is_some_and(|token| self.members.is_member(channel, token)),
        }
    }

    /// Channels shared with a subject, sorted by name.
    pub fn common_channels<'a>(&self, subject: impl Into<Subject<'a>>) -> TrackerResult<Vec<String>> {
        let token = self.resolve(subject)?;
        Ok(self.members.common_channels(token))
    }

    /// Addresses of known users matching a hostmask glob.
    ///
    /// Each user is matched as `nick!ident@host` with unknown parts left
    /// empty. With a channel, only that channel's members are searched.
    pub fn ial(&self, mask: &str, channel: Option<&str>) -> TrackerResult<Vec<String>> {
        let pattern = HostmaskPattern::new(mask)?;
        let addresses: Vec<String> = match channel {
            Some(channel) => {
                let members = self
                    .members
                    .members(channel)
                    .ok_or_else(|| TrackerError::NoSuchChannel(channel.to_string()))?;
                members
                    .keys()
                    .filter_map(|&token| self.registry.record(token))
                    .map(IdentityRecord::full_address)
                    .collect()
            }
            None => self
                .registry
                .iter()
                .map(|(_, record)| record.full_address())
                .collect(),
        };
        Ok(addresses
            .into_iter()
            .filter(|address| pattern.is_match(address))
            .collect())
    }

    /// Status modes a subject holds on `channel`.
    pub fn user_privileges<'a>(
        &self,
        channel: &str,
        subject: impl Into<Subject<'a>>,
    ) -> TrackerResult<&PrivilegeSet> {
        if !self.members.has_channel(channel) {
            return Err(TrackerError::NoSuchChannel(channel.to_string()));
        }
        let token = self.resolve(subject)?;
        self.members.privileges(channel, token).ok_or_else(|| {
            let user = self
                .registry
                .record(token)
                .map_or_else(|| token.to_string(), |record| record.nick.clone());
            TrackerError::NotOnChannel {
                channel: channel.to_string(),
                user,
            }
        })
    }

    /// Normalized nicknames on `channel` selected by status modes.
    ///
    /// With `negate` false, members holding every mode in `modes`; with
    /// `negate` true, members holding none of them. An empty `modes` selects
    /// members with no status at all (or, negated, with any).
    pub fn by_channel_modes(
        &self,
        channel: &str,
        modes: &[char],
        negate: bool,
    ) -> TrackerResult<Vec<String>> {
        let members = self
            .members
            .members(channel)
            .ok_or_else(|| TrackerError::NoSuchChannel(channel.to_string()))?;
        let wanted: PrivilegeSet = modes.iter().copied().collect();

        Ok(members
            .iter()
            .filter(|(_, held)| {
                if wanted.is_empty() {
                    held.is_empty() == negate
                } else if negate {
                    wanted.is_disjoint(held)
                } else {
                    wanted.is_subset(held)
                }
            })
            .filter_map(|(&token, _)| self.registry.key_of(token))
            .map(str::to_string)
            .collect())
    }
}
