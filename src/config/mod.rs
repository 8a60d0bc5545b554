//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: config struct definitions (Config, TrackerConfig, LogConfig)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup checks that collect every problem at once

mod defaults;
mod types;
pub mod validation;

pub use types::{Config, ConfigError, LogConfig, LogFormat, TrackerConfig};
pub use validation::{ValidationError, validate};
