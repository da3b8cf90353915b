//! Clone a Salesforce record from one org into another.
//!
//! The source flow reads the record open in a tab, strips everything that
//! cannot be written, and parks it in persistent storage; the destination flow
//! takes it from there and inserts it into the org open in another tab.

pub mod browser;
pub mod config;
pub mod describe;
pub mod error;
mod fsutil;
pub mod handoff;
pub mod identity;
pub mod model;
pub mod orchestrator;
pub mod record;
pub mod remote;
pub mod session;

pub use self::error::{CloneError, Result};

#[cfg(test)]
#[path = "tests/fake_org.rs"]
pub(crate) mod fake_org;
