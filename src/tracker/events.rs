//! Inbound events and outbound actions.

use crate::state::TimerId;
use serde::{Deserialize, Serialize};
use slirc_ident::{Casemapping, Identity};
use std::time::Duration;

/// A membership or identity observation, already decoded from the wire.
///
/// Events must be fed in the order the server sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// JOIN, with the joining user's full prefix.
    Join { channel: String, source: Identity },
    /// PART.
    Part { channel: String, nick: String },
    /// KICK; `target` is the user being removed.
    Kick { channel: String, target: String },
    /// QUIT.
    Quit { nick: String },
    /// NICK.
    Nick { old: String, new: String },
    /// RPL_NAMREPLY (353); entries are as sent, status symbols included.
    Names {
        channel: String,
        entries: Vec<String>,
    },
    /// RPL_WHOREPLY (352).
    Who {
        nick: String,
        ident: String,
        host: String,
    },
    /// A status mode (`+o`, `+v`, ...) given to a channel member.
    ModeGiven {
        channel: String,
        target: String,
        mode: char,
    },
    /// A status mode taken from a channel member.
    ModeTaken {
        channel: String,
        target: String,
        mode: char,
    },
    /// A watched user is online (WATCH / MONITOR).
    Notify { source: Identity },
    /// A watched user went offline.
    UnNotify { nick: String },
    /// The server described itself (ISUPPORT / CAP).
    Capabilities {
        #[serde(default)]
        casemapping: Option<Casemapping>,
        /// `PREFIX` value, e.g. `(qaohv)~&@%+`.
        #[serde(default)]
        prefix: Option<String>,
        /// NAMESX is available and should be switched on.
        #[serde(default)]
        namesx: bool,
        /// UHNAMES is available and should be switched on.
        #[serde(default)]
        uhnames: bool,
        /// `userhost-in-names` was acknowledged during CAP negotiation.
        #[serde(default)]
        userhost_in_names: bool,
    },
}

impl TrackerEvent {
    /// Short static name, for spans and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Part { .. } => "part",
            Self::Kick { .. } => "kick",
            Self::Quit { .. } => "quit",
            Self::Nick { .. } => "nick",
            Self::Names { .. } => "names",
            Self::Who { .. } => "who",
            Self::ModeGiven { .. } => "mode_given",
            Self::ModeTaken { .. } => "mode_taken",
            Self::Notify { .. } => "notify",
            Self::UnNotify { .. } => "un_notify",
            Self::Capabilities { .. } => "capabilities",
        }
    }
}

/// Something the caller must do on the tracker's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerAction {
    /// Send this raw line to the server.
    Send(String),
    /// Call [`Tracker::expire`](crate::Tracker::expire) with `timer` once
    /// `delay` has elapsed.
    Schedule { timer: TimerId, delay: Duration },
    /// Forget a previously scheduled timer.
    Cancel(TimerId),
}

/// How a user left a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leave<'a> {
    /// Left every channel at once.
    Quit,
    Part(&'a str),
    Kick(&'a str),
}
