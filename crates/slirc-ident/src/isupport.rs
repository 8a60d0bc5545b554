//! The `PREFIX` ISUPPORT token.

use std::fmt;
use std::str::FromStr;

use crate::error::IdentError;

/// Mapping between channel status symbols and the modes they stand for.
///
/// Parsed from a `PREFIX` value such as `(qaohv)~&@%+`. Order matters: the
/// first pair is the highest status.
///
/// # Example
///
/// ```
/// use slirc_ident::PrefixMap;
///
/// let map = PrefixMap::parse("(qaohv)~&@%+").unwrap();
/// assert_eq!(map.mode_for_prefix('~'), Some('q'));
/// assert_eq!(map.prefix_for_mode('v'), Some('+'));
/// assert_eq!(map.mode_for_prefix('!'), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixMap {
    modes: Vec<char>,
    prefixes: Vec<char>,
}

impl PrefixMap {
    /// Parse a `PREFIX` value like `(ov)@+`.
    ///
    /// An empty value (`PREFIX=` or `()`) yields a map with no statuses.
    pub fn parse(s: &str) -> Result<Self, IdentError> {
        if s.is_empty() || s == "()" {
            return Ok(Self {
                modes: Vec::new(),
                prefixes: Vec::new(),
            });
        }

        let malformed = || IdentError::MalformedPrefix(s.to_string());
        let inner = s.strip_prefix('(').ok_or_else(malformed)?;
        let (modes, prefixes) = inner.split_once(')').ok_or_else(malformed)?;

        let modes: Vec<char> = modes.chars().collect();
        let prefixes: Vec<char> = prefixes.chars().collect();
        if modes.len() != prefixes.len() {
            return Err(IdentError::PrefixLengthMismatch {
                value: s.to_string(),
                modes: modes.len(),
                symbols: prefixes.len(),
            });
        }

        Ok(Self { modes, prefixes })
    }

    /// Returns the mode letter for a status symbol, e.g. `@` → `o`.
    #[inline]
    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefixes
            .iter()
            .position(|&c| c == prefix)
            .map(|i| self.modes[i])
    }

    /// Returns the status symbol for a mode letter, e.g. `o` → `@`.
    #[inline]
    pub fn prefix_for_mode(&self, mode: char) -> Option<char> {
        self.modes
            .iter()
            .position(|&c| c == mode)
            .map(|i| self.prefixes[i])
    }

    /// Returns true if `mode` is a status mode on this server.
    #[inline]
    pub fn is_prefix_mode(&self, mode: char) -> bool {
        self.modes.contains(&mode)
    }

    /// Split the leading status symbols off a NAMES entry.
    ///
    /// Symbols are consumed until the first character that does not map to a
    /// mode; the mapped mode letters and the remainder are returned.
    ///
    /// ```
    /// use slirc_ident::PrefixMap;
    ///
    /// let map = PrefixMap::parse("(ov)@+").unwrap();
    /// assert_eq!(map.strip_prefixes("@+foo"), (vec!['o', 'v'], "foo"));
    /// assert_eq!(map.strip_prefixes("foo"), (vec![], "foo"));
    /// ```
    pub fn strip_prefixes<'a>(&self, entry: &'a str) -> (Vec<char>, &'a str) {
        let mut modes = Vec::new();
        for (idx, c) in entry.char_indices() {
            match self.mode_for_prefix(c) {
                Some(mode) => modes.push(mode),
                None => return (modes, &entry[idx..]),
            }
        }
        (modes, "")
    }

    /// Number of status modes.
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Whether the server advertised no status modes at all.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Default for PrefixMap {
    /// The RFC 1459 statuses, used until the server says otherwise.
    fn default() -> Self {
        Self {
            modes: vec!['o', 'v'],
            prefixes: vec!['@', '+'],
        }
    }
}

impl fmt::Display for PrefixMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modes: String = self.modes.iter().collect();
        let prefixes: String = self.prefixes.iter().collect();
        write!(f, "({modes}){prefixes}")
    }
}

impl FromStr for PrefixMap {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
