//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use slirc_ident::IdentError;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("tracker.prefix is invalid: {0}")]
    InvalidPrefix(IdentError),
    #[error("log.level is not a valid filter directive: {0}")]
    InvalidLogLevel(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.tracker.prefix_map() {
        errors.push(ValidationError::InvalidPrefix(e));
    }

    if let Err(e) = EnvFilter::try_new(&config.log.level) {
        errors.push(ValidationError::InvalidLogLevel(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
