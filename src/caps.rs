//! What the server told us about itself.
//!
//! The tracker consults these to normalize nicknames, to decode status
//! symbols in NAMES replies and to know whether NAMES entries carry full
//! `nick!ident@host` masks.

use slirc_ident::{Casemapping, PrefixMap};

/// Server capabilities relevant to presence tracking.
#[derive(Debug, Clone, Default)]
pub struct ServerCaps {
    casemapping: Casemapping,
    prefixes: PrefixMap,
    userhost_names: bool,
    extended_names: bool,
}

impl ServerCaps {
    pub fn new(casemapping: Casemapping, prefixes: PrefixMap) -> Self {
        Self {
            casemapping,
            prefixes,
            ..Self::default()
        }
    }

    /// Canonical form of a nickname under the server's casemapping.
    #[inline]
    pub fn normalize(&self, nick: &str) -> String {
        self.casemapping.normalize(nick)
    }

    /// Mode letter for a status symbol (`@` → `o`).
    #[inline]
    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefixes.mode_for_prefix(prefix)
    }

    /// Whether NAMES entries include `ident@host` (UHNAMES / userhost-in-names).
    pub fn has_userhost_names(&self) -> bool {
        self.userhost_names
    }

    /// Whether NAMES entries list every status symbol (NAMESX / multi-prefix).
    pub fn has_extended_names(&self) -> bool {
        self.extended_names
    }

    pub fn casemapping(&self) -> Casemapping {
        self.casemapping
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub(crate) fn set_casemapping(&mut self, casemapping: Casemapping) {
        self.casemapping = casemapping;
    }

    pub(crate) fn set_prefixes(&mut self, prefixes: PrefixMap) {
        self.prefixes = prefixes;
    }

    pub(crate) fn set_userhost_names(&mut self, enabled: bool) {
        self.userhost_names = enabled;
    }

    pub(crate) fn set_extended_names(&mut self, enabled: bool) {
        self.extended_names = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let caps = ServerCaps::default();
        assert_eq!(caps.casemapping(), Casemapping::Rfc1459);
        assert_eq!(caps.normalize("Foo[]"), "foo{}");
        assert_eq!(caps.mode_for_prefix('@'), Some('o'));
        assert_eq!(caps.mode_for_prefix('~'), None);
        assert!(!caps.has_userhost_names());
        assert!(!caps.has_extended_names());
    }

    #[test]
    fn test_custom_prefixes() {
        let caps = ServerCaps::new(
            Casemapping::Ascii,
            PrefixMap::parse("(qaohv)~&@%+").unwrap(),
        );
        assert_eq!(caps.mode_for_prefix('~'), Some('q'));
        assert_eq!(caps.normalize("Foo[]"), "foo[]");
    }
}
