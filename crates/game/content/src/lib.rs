//! Data-driven combat content and loaders.
//!
//! This crate houses the character roster and loads tuning data:
//! - Character roster (built in, or data-driven via RON)
//! - Combat rule tuning (data-driven via TOML)
//!
//! All loaders use clash-core types directly with serde for RON/TOML deserialization.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{Role, Roster, RosterEntry};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
