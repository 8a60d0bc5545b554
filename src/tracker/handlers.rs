//! Event dispatch.

use super::{Leave, Tracker, TrackerAction, TrackerEvent};
use crate::state::Token;
use slirc_ident::{Casemapping, Identity, PrefixMap, canonical_host};
use tracing::{debug, trace, warn};

impl Tracker {
    pub(super) fn dispatch(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::Join { channel, source } => self.on_join(&channel, &source),
            TrackerEvent::Part { channel, nick } => {
                self.handle_leaving(&nick, Leave::Part(&channel))
            }
            TrackerEvent::Kick { channel, target } => {
                self.handle_leaving(&target, Leave::Kick(&channel))
            }
            TrackerEvent::Quit { nick } => self.handle_leaving(&nick, Leave::Quit),
            TrackerEvent::Nick { old, new } => self.propagate_rename(&old, &new),
            TrackerEvent::Names { channel, entries } => self.on_names(&channel, &entries),
            TrackerEvent::Who { nick, ident, host } => {
                self.update_user(&nick, Some(&ident), Some(&canonical_host(&host)));
            }
            TrackerEvent::ModeGiven {
                channel,
                target,
                mode,
            } => self.on_mode(&channel, &target, mode, true),
            TrackerEvent::ModeTaken {
                channel,
                target,
                mode,
            } => self.on_mode(&channel, &target, mode, false),
            TrackerEvent::Notify { source } => {
                self.sighted(&source);
            }
            TrackerEvent::UnNotify { nick } => {
                self.remove_user(&nick);
            }
            TrackerEvent::Capabilities {
                casemapping,
                prefix,
                namesx,
                uhnames,
                userhost_in_names,
            } => self.on_capabilities(casemapping, prefix.as_deref(), namesx, uhnames, userhost_in_names),
        }
    }

    fn sighted(&mut self, source: &Identity) -> Token {
        let host = source.host().map(canonical_host);
        self.update_user(source.nick(), source.ident(), host.as_deref())
    }

    fn on_join(&mut self, channel: &str, source: &Identity) {
        let token = self.sighted(source);
        self.members.join(channel, token);
    }

    fn on_names(&mut self, channel: &str, entries: &[String]) {
        if !self.caps.has_userhost_names() {
            self.actions.push(TrackerAction::Send(format!("WHO {channel}")));
        }
        for entry in entries.iter().flat_map(|entry| entry.split_whitespace()) {
            let (modes, rest) = self.caps.prefixes().strip_prefixes(entry);
            if rest.is_empty() {
                trace!(entry, "names entry without a nickname");
                continue;
            }
            let token = self.sighted(&Identity::parse(rest));
            self.members.set(channel, token, modes.into_iter().collect());
        }
    }

    fn on_mode(&mut self, channel: &str, target: &str, mode: char, given: bool) {
        let Some(token) = self.lookup(target) else {
            trace!(channel, target, mode = %mode, "mode change for untracked user");
            return;
        };
        let applied = if given {
            self.members.grant(channel, token, mode)
        } else {
            self.members.revoke(channel, token, mode)
        };
        if !applied {
            trace!(channel, target, mode = %mode, "mode change for non-member");
        }
    }

    fn on_capabilities(
        &mut self,
        casemapping: Option<Casemapping>,
        prefix: Option<&str>,
        namesx: bool,
        uhnames: bool,
        userhost_in_names: bool,
    ) {
        if let Some(prefix) = prefix {
            match PrefixMap::parse(prefix) {
                Ok(map) => self.caps.set_prefixes(map),
                Err(error) => warn!(prefix, %error, "ignoring server PREFIX"),
            }
        }
        if let Some(casemapping) = casemapping
            && casemapping != self.caps.casemapping()
        {
            debug!(%casemapping, "casemapping changed, re-indexing nicknames");
            self.caps.set_casemapping(casemapping);
            self.rekey();
        }
        if namesx && !self.caps.has_extended_names() {
            self.caps.set_extended_names(true);
            self.actions.push(TrackerAction::Send("PROTOCTL NAMESX".into()));
        }
        if uhnames && !self.caps.has_userhost_names() {
            self.caps.set_userhost_names(true);
            self.actions.push(TrackerAction::Send("PROTOCTL UHNAMES".into()));
        }
        if userhost_in_names {
            self.caps.set_userhost_names(true);
        }
    }
}
