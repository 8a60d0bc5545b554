//! IRC case-mapping functions.
//!
//! IRC compares nicknames case-insensitively, but what "case" means depends on
//! the server's `CASEMAPPING` ISUPPORT token. Under `rfc1459` some punctuation
//! is considered equivalent (e.g., `[` and `{`); `strict-rfc1459` omits the
//! `~`/`^` pair; `ascii` folds letters only.

use std::fmt;
use std::str::FromStr;

use crate::error::IdentError;

/// Convert a single character to IRC lowercase using RFC 1459 case mapping.
///
/// In addition to ASCII lowercase conversion, this maps:
/// - `[` → `{`
/// - `]` → `}`
/// - `\` → `|`
/// - `~` → `^`
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Convert a string to IRC lowercase using RFC 1459 case mapping.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Compare two strings using RFC 1459 case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}

/// Case-mapping rule advertised by a server through `CASEMAPPING`.
///
/// Servers that do not advertise anything are assumed to use `rfc1459`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Casemapping {
    /// Only `A-Z` fold to `a-z`.
    #[cfg_attr(feature = "serde", serde(rename = "ascii"))]
    Ascii,
    /// ASCII plus `[]\~` ↔ `{}|^`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "rfc1459"))]
    Rfc1459,
    /// ASCII plus `[]\` ↔ `{}|`.
    #[cfg_attr(feature = "serde", serde(rename = "strict-rfc1459"))]
    StrictRfc1459,
}

impl Casemapping {
    /// Lowercase a single character under this mapping.
    #[inline]
    pub const fn lower_char(self, c: char) -> char {
        match self {
            Casemapping::Ascii => c.to_ascii_lowercase(),
            Casemapping::Rfc1459 => irc_lower_char(c),
            Casemapping::StrictRfc1459 => match c {
                '~' => '~',
                other => irc_lower_char(other),
            },
        }
    }

    /// Canonical form of a nickname, used as the lookup key for every
    /// nick-based index.
    pub fn normalize(self, nick: &str) -> String {
        nick.chars().map(|c| self.lower_char(c)).collect()
    }

    /// Compare two nicknames under this mapping.
    pub fn nick_eq(self, a: &str, b: &str) -> bool {
        a.len() == b.len()
            && a.chars()
                .zip(b.chars())
                .all(|(ca, cb)| self.lower_char(ca) == self.lower_char(cb))
    }

    /// The `CASEMAPPING` token value for this mapping.
    pub const fn as_str(self) -> &'static str {
        match self {
            Casemapping::Ascii => "ascii",
            Casemapping::Rfc1459 => "rfc1459",
            Casemapping::StrictRfc1459 => "strict-rfc1459",
        }
    }
}

impl fmt::Display for Casemapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Casemapping {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Casemapping::Ascii),
            "rfc1459" => Ok(Casemapping::Rfc1459),
            "strict-rfc1459" => Ok(Casemapping::StrictRfc1459),
            _ => Err(IdentError::UnknownCasemapping(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_irc_lower_char() {
        assert_eq!(irc_lower_char('A'), 'a');
        assert_eq!(irc_lower_char('Z'), 'z');
        assert_eq!(irc_lower_char('['), '{');
        assert_eq!(irc_lower_char(']'), '}');
        assert_eq!(irc_lower_char('\\'), '|');
        assert_eq!(irc_lower_char('~'), '^');
        assert_eq!(irc_lower_char('0'), '0');
        assert_eq!(irc_lower_char('#'), '#');
    }

    #[test]
    fn test_irc_eq() {
        assert!(irc_eq("Hello", "hELLO"));
        assert!(irc_eq("nick\\test", "NICK|TEST"));
        assert!(!irc_eq("short", "longer"));
    }

    #[test]
    fn test_normalize_per_mapping() {
        assert_eq!(Casemapping::Ascii.normalize("Foo[~]"), "foo[~]");
        assert_eq!(Casemapping::Rfc1459.normalize("Foo[~]"), "foo{^}");
        assert_eq!(Casemapping::StrictRfc1459.normalize("Foo[~]"), "foo{~}");
    }

    #[test]
    fn test_mapping_eq() {
        assert!(Casemapping::Rfc1459.nick_eq("Foo~", "foo^"));
        assert!(!Casemapping::StrictRfc1459.nick_eq("Foo~", "foo^"));
        assert!(!Casemapping::Ascii.nick_eq("a[", "a{"));
    }

    #[test]
    fn test_parse_casemapping() {
        assert_eq!("rfc1459".parse::<Casemapping>(), Ok(Casemapping::Rfc1459));
        assert_eq!("ASCII".parse::<Casemapping>(), Ok(Casemapping::Ascii));
        assert_eq!(
            "strict-rfc1459".parse::<Casemapping>(),
            Ok(Casemapping::StrictRfc1459)
        );
        assert!("rfc7613".parse::<Casemapping>().is_err());
        assert_eq!(Casemapping::default().to_string(), "rfc1459");
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(nick in "\\PC{0,16}") {
            for mapping in [Casemapping::Ascii, Casemapping::Rfc1459, Casemapping::StrictRfc1459] {
                let once = mapping.normalize(&nick);
                prop_assert_eq!(mapping.normalize(&once), once.clone());
                prop_assert!(mapping.nick_eq(&nick, &once));
            }
        }
    }
}
