//! Event builders and timer helpers.

use slirc_presence::slirc_ident::Identity;
use slirc_presence::{ServerCaps, TimerId, Tracker, TrackerAction, TrackerEvent};
use std::time::Duration;

/// A tracker with default capabilities and the given grace period.
pub fn tracker(expire_secs: u64) -> Tracker {
    Tracker::with_caps(ServerCaps::default(), Duration::from_secs(expire_secs))
}

pub fn join(channel: &str, source: &str) -> TrackerEvent {
    TrackerEvent::Join {
        channel: channel.to_string(),
        source: Identity::parse(source),
    }
}

pub fn part(channel: &str, nick: &str) -> TrackerEvent {
    TrackerEvent::Part {
        channel: channel.to_string(),
        nick: nick.to_string(),
    }
}

pub fn kick(channel: &str, target: &str) -> TrackerEvent {
    TrackerEvent::Kick {
        channel: channel.to_string(),
        target: target.to_string(),
    }
}

pub fn quit(nick: &str) -> TrackerEvent {
    TrackerEvent::Quit {
        nick: nick.to_string(),
    }
}

pub fn nick(old: &str, new: &str) -> TrackerEvent {
    TrackerEvent::Nick {
        old: old.to_string(),
        new: new.to_string(),
    }
}

pub fn names(channel: &str, entries: &[&str]) -> TrackerEvent {
    TrackerEvent::Names {
        channel: channel.to_string(),
        entries: entries.iter().map(|e| e.to_string()).collect(),
    }
}

pub fn who(nick: &str, ident: &str, host: &str) -> TrackerEvent {
    TrackerEvent::Who {
        nick: nick.to_string(),
        ident: ident.to_string(),
        host: host.to_string(),
    }
}

pub fn op(channel: &str, target: &str, mode: char) -> TrackerEvent {
    TrackerEvent::ModeGiven {
        channel: channel.to_string(),
        target: target.to_string(),
        mode,
    }
}

pub fn deop(channel: &str, target: &str, mode: char) -> TrackerEvent {
    TrackerEvent::ModeTaken {
        channel: channel.to_string(),
        target: target.to_string(),
        mode,
    }
}

/// `PREFIX` announcement with userhost-in-names acknowledged.
pub fn prefix_caps(prefix: &str) -> TrackerEvent {
    TrackerEvent::Capabilities {
        casemapping: None,
        prefix: Some(prefix.to_string()),
        namesx: false,
        uhnames: false,
        userhost_in_names: true,
    }
}

/// Timers armed by a batch of actions.
pub fn scheduled(actions: &[TrackerAction]) -> Vec<TimerId> {
    actions
        .iter()
        .filter_map(|action| match action {
            TrackerAction::Schedule { timer, .. } => Some(*timer),
            _ => None,
        })
        .collect()
}

/// Lines a batch of actions asks to send.
pub fn sent(actions: &[TrackerAction]) -> Vec<&str> {
    actions
        .iter()
        .filter_map(|action| match action {
            TrackerAction::Send(line) => Some(line.as_str()),
            _ => None,
        })
        .collect()
}
