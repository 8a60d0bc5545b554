//! Wildcard hostmask matching.
//!
//! Masks use the traditional IRC wildcards: `*` matches any run of
//! characters (including none) and `?` matches exactly one. Every other
//! character matches itself, case-sensitively. Masks are compiled once into
//! an anchored [`Regex`] so that a search over a large address list does not
//! re-parse the pattern for each entry.

use std::borrow::Cow;

use regex::Regex;

use crate::error::IdentError;

/// Complete a partial mask into `nick!ident@host` form.
///
/// A mask without `!` gets `!*@*` appended; a mask with `!` but without `@`
/// gets `@*`.
///
/// ```
/// use slirc_ident::complete_mask;
///
/// assert_eq!(complete_mask("foo"), "foo!*@*");
/// assert_eq!(complete_mask("foo!bar"), "foo!bar@*");
/// assert_eq!(complete_mask("*!*@*.fr"), "*!*@*.fr");
/// ```
pub fn complete_mask(mask: &str) -> Cow<'_, str> {
    if !mask.contains('!') {
        Cow::Owned(format!("{mask}!*@*"))
    } else if !mask.contains('@') {
        Cow::Owned(format!("{mask}@*"))
    } else {
        Cow::Borrowed(mask)
    }
}

/// Translate a glob into an anchored regular expression source.
///
/// ```
/// use slirc_ident::glob_to_regex;
///
/// assert_eq!(glob_to_regex("a*b?.c"), r"(?s)^a.*b.\.c$");
/// ```
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push_str("(?s)^");
    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

/// A compiled wildcard pattern.
#[derive(Clone, Debug)]
pub struct Glob {
    source: String,
    regex: Regex,
}

impl Glob {
    /// Compile a glob.
    pub fn new(glob: &str) -> Result<Self, IdentError> {
        let regex = Regex::new(&glob_to_regex(glob)).map_err(|e| IdentError::InvalidMask {
            mask: glob.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: glob.to_string(),
            regex,
        })
    }

    /// Whether `text` matches the whole pattern.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The glob this matcher was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// A wildcard pattern over full `nick!ident@host` masks.
///
/// # Examples
///
/// ```
/// use slirc_ident::HostmaskPattern;
///
/// let french = HostmaskPattern::new("*!*@*.fr").unwrap();
/// assert!(french.is_match("nick!user@box.example.fr"));
/// assert!(!french.is_match("nick!user@box.example.com"));
///
/// // Partial masks are completed first.
/// let foo = HostmaskPattern::new("foo").unwrap();
/// assert_eq!(foo.mask(), "foo!*@*");
/// assert!(foo.is_match("foo!bar@baz"));
/// assert!(foo.is_match("foo!@"));
/// ```
#[derive(Clone, Debug)]
pub struct HostmaskPattern {
    glob: Glob,
}

impl HostmaskPattern {
    /// Complete and compile a mask.
    pub fn new(mask: &str) -> Result<Self, IdentError> {
        let glob = Glob::new(&complete_mask(mask))?;
        Ok(Self { glob })
    }

    /// Whether a full `nick!ident@host` string matches.
    #[inline]
    pub fn is_match(&self, hostmask: &str) -> bool {
        self.glob.is_match(hostmask)
    }

    /// The completed mask.
    pub fn mask(&self) -> &str {
        self.glob.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_glob_basic() {
        let glob = Glob::new("te?t*").unwrap();
        assert!(glob.is_match("test"));
        assert!(glob.is_match("text-book"));
        assert!(!glob.is_match("tst"));
        assert!(!glob.is_match("a test"));
    }

    #[test]
    fn test_glob_escapes_metacharacters() {
        let glob = Glob::new("a.b+(c)[d]").unwrap();
        assert!(glob.is_match("a.b+(c)[d]"));
        assert!(!glob.is_match("axb+(c)[d]"));

        let glob = Glob::new("#").unwrap();
        assert!(glob.is_match("#"));
    }

    #[test]
    fn test_glob_is_case_sensitive() {
        let glob = Glob::new("*.FR").unwrap();
        assert!(glob.is_match("host.FR"));
        assert!(!glob.is_match("host.fr"));
    }

    #[test]
    fn test_hostmask_completion() {
        assert_eq!(HostmaskPattern::new("foo").unwrap().mask(), "foo!*@*");
        assert_eq!(HostmaskPattern::new("foo!bar").unwrap().mask(), "foo!bar@*");
        assert_eq!(HostmaskPattern::new("foo@bar").unwrap().mask(), "foo@bar!*@*");
        assert_eq!(HostmaskPattern::new("a!b@c").unwrap().mask(), "a!b@c");
    }

    #[test]
    fn test_hostmask_domain_search() {
        let pattern = HostmaskPattern::new("*!*@*.fr").unwrap();
        assert!(pattern.is_match("a!b@c.fr"));
        assert!(!pattern.is_match("a!b@c.fr.com"));
        assert!(!pattern.is_match("a!@"));
    }

    proptest! {
        #[test]
        fn test_glob_matches_its_own_text(text in "\\PC{0,24}") {
            let glob = Glob::new(&text).unwrap();
            prop_assert!(glob.is_match(&text));
        }

        #[test]
        fn test_star_matches_everything(text in "\\PC{0,24}") {
            prop_assert!(Glob::new("*").unwrap().is_match(&text));
        }
    }
}
