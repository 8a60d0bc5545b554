//! Tracked state: the identity registry and the membership table.
//!
//! Both tables are exclusively owned by a [`Tracker`](crate::Tracker); nothing
//! here knows about casemapping, timers or events.

mod membership;
mod record;
mod registry;
mod token;

pub use membership::{Members, MembershipTable, PrivilegeSet};
pub use record::IdentityRecord;
pub use registry::IdentityRegistry;
pub use token::{Sequence, TimerId, Token};
