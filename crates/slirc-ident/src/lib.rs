//! # slirc-ident
//!
//! Identity-level helpers shared by IRC clients that track other users:
//!
//! - [`Casemapping`]: nickname case-folding as advertised by `CASEMAPPING`
//! - [`Identity`]: lenient `nick!ident@host` parsing
//! - [`PrefixMap`]: the `PREFIX` ISUPPORT token (status symbol to mode letter)
//! - [`HostmaskPattern`]: wildcard hostmask searches compiled to anchored regexes
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_ident::{Casemapping, HostmaskPattern, Identity, PrefixMap};
//!
//! let who: Identity = "Foo[away]!bar@example.fr".parse().unwrap();
//! assert_eq!(Casemapping::Rfc1459.normalize(who.nick()), "foo{away}");
//!
//! let prefixes = PrefixMap::parse("(ov)@+").unwrap();
//! assert_eq!(prefixes.mode_for_prefix('@'), Some('o'));
//!
//! let pattern = HostmaskPattern::new("*!*@*.fr").unwrap();
//! assert!(pattern.is_match(&who.to_string()));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod error;
pub mod identity;
pub mod isupport;
pub mod mask;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower, Casemapping};
pub use self::error::{IdentError, Result};
pub use self::identity::{canonical_host, extract_nick, Identity};
pub use self::isupport::PrefixMap;
pub use self::mask::{complete_mask, glob_to_regex, Glob, HostmaskPattern};
