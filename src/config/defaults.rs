//! Default value functions for configuration.

use slirc_ident::PrefixMap;

/// Seconds an offline user stays resolvable before being forgotten.
pub fn default_expire_delay() -> i64 {
    60
}

/// Status prefixes assumed until the server sends `PREFIX`.
pub fn default_prefix() -> String {
    PrefixMap::default().to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}
