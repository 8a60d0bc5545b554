//! Integration test common infrastructure.
//!
//! Provides event builders for driving a `Tracker` directly and a
//! [`TestDaemon`] that runs the `slirc-presence` binary over pipes.

#![allow(dead_code)]

pub mod daemon;
pub mod events;

#[allow(unused_imports)]
pub use daemon::TestDaemon;
#[allow(unused_imports)]
pub use events::*;
