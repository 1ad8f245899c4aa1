//! Runtime orchestration for combat encounters and roguelite runs.
//!
//! This crate wraps the deterministic engine in `clash-core` with the
//! pieces a game shell needs: a session registry addressed by handle, a
//! `rand`-backed random source, run progression across floors, and
//! structured `tracing` output. Installing a subscriber is left to the
//! embedding application.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the session registry ([`CombatService`])
//! - [`run`] drives stage selection, shrines and the shop
//! - [`config`] and [`rng`] provide runtime setup
pub mod config;
pub mod error;
pub mod rng;
pub mod run;
pub mod service;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use rng::RandSource;
pub use run::{Run, ShrineChoice, ShrineOutcome, Stage, StageKind};
pub use service::{CombatService, SessionHandle, SessionSnapshot};
