//! slirc-presence - Straylight IRC presence tracker
//!
//! Tracks, from a client's point of view, which users share channels with
//! us, who they are (`nick!ident@host`) and which status modes they hold.
//! Identities are addressed through stable [`Token`]s that survive nickname
//! changes and go stale once the identity is forgotten.
//!
//! The [`Tracker`] does no I/O. The [`driver`] module runs it over
//! line-delimited JSON with real timers; that is what the
//! `slirc-presence` binary does.

#![deny(clippy::all)]

pub mod caps;
pub mod config;
pub mod driver;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod tracker;

pub use slirc_ident;

pub use caps::ServerCaps;
pub use config::Config;
pub use driver::{Driver, Reply, Request};
pub use error::{ErrorKind, TrackerError, TrackerResult};
pub use state::{IdentityRecord, PrivilegeSet, TimerId, Token};
pub use tracker::{
    Info, InfoField, Leave, STALE_NICK, Subject, TokenHandle, Tracker, TrackerAction, TrackerEvent,
};
