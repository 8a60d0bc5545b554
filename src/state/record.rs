//! Per-token identity records.

use super::TimerId;

/// What is known about one tracked identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Nickname as last seen, with the case the user chose.
    pub nick: String,
    /// Ident (user) part, `None` until confirmed.
    pub ident: Option<String>,
    /// Host part, `None` until confirmed.
    pub host: Option<String>,
    /// Whether the user currently shares a channel or was seen online.
    pub online: bool,
    /// Removal timer armed while the record is offline.
    pub pending_removal: Option<TimerId>,
}

impl IdentityRecord {
    /// A fresh, online record.
    pub fn new(nick: &str, ident: Option<&str>, host: Option<&str>) -> Self {
        Self {
            nick: nick.to_string(),
            ident: ident.map(str::to_string),
            host: host.map(str::to_string),
            online: true,
            pending_removal: None,
        }
    }

    /// Whether ident and host come from an authoritative source.
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.ident.is_some()
    }

    /// Whether an incoming `(ident, host)` pair is the one on record.
    pub fn same_identity(&self, ident: Option<&str>, host: Option<&str>) -> bool {
        self.ident.as_deref() == ident && self.host.as_deref() == host
    }

    /// `nick!ident@host`, with `*` standing in for unknown parts.
    pub fn mask(&self) -> String {
        match &self.ident {
            None => format!("{}!*@*", self.nick),
            Some(ident) => format!(
                "{}!{}@{}",
                self.nick,
                ident,
                self.host.as_deref().unwrap_or("*")
            ),
        }
    }

    /// `nick!ident@host`, with unknown parts left empty.
    ///
    /// This is the form address-list searches are matched against.
    pub fn full_address(&self) -> String {
        format!(
            "{}!{}@{}",
            self.nick,
            self.ident.as_deref().unwrap_or_default(),
            self.host.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_of_unconfirmed_record() {
        let record = IdentityRecord::new("foo", None, None);
        assert!(!record.is_confirmed());
        assert_eq!(record.mask(), "foo!*@*");
        assert_eq!(record.full_address(), "foo!@");
    }

    #[test]
    fn test_mask_of_confirmed_record() {
        let record = IdentityRecord::new("foo", Some("ident"), Some("host"));
        assert!(record.is_confirmed());
        assert!(record.online);
        assert_eq!(record.mask(), "foo!ident@host");
        assert_eq!(record.full_address(), "foo!ident@host");
        assert!(record.same_identity(Some("ident"), Some("host")));
        assert!(!record.same_identity(Some("ident"), Some("elsewhere")));
    }
}
