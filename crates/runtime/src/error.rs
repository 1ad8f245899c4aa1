//! Errors surfaced by the runtime API.
//!
//! Wraps engine rejections and adds the failures that only exist at the
//! orchestration layer: stale session handles, unknown roster keys and
//! calls made at the wrong point of a run.
use clash_core::{CombatError, GameError};
use thiserror::Error;

use crate::run::StageKind;
use crate::service::SessionHandle;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("no combat session registered for {0}")]
    UnknownSession(SessionHandle),

    #[error("roster has no {role} named '{key}'")]
    UnknownCharacter { key: String, role: &'static str },

    #[error("roster has no enemies to fight")]
    NoEnemies,

    #[error("cannot {operation} during the {actual} stage")]
    WrongStage {
        operation: &'static str,
        actual: StageKind,
    },

    #[error("failed to load content")]
    Content(#[source] anyhow::Error),
}

impl RuntimeError {
    /// Rejected actions leave the session untouched and can be retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RuntimeError::Combat(err) if err.severity().is_recoverable())
    }
}
