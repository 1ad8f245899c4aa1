//! Common error infrastructure for clash-core.
//!
//! Numeric edge cases (damage, HP, speed floors) are clamped rather than
//! raised, so the only errors the engine surfaces are rejected actions and
//! calls made outside the session lifecycle.

use crate::action::ActionId;
use crate::combat::CombatOutcome;
use crate::entity::Side;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: reject the input and re-prompt; nothing was mutated
/// - **Validation**: malformed input that should not be retried unchanged
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the call cannot proceed in the current lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for all clash-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by a combat session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// The action's precondition is not met. No state was mutated.
    #[error("{action} rejected: {reason}")]
    InvalidAction {
        action: ActionId,
        reason: InvalidActionReason,
    },

    /// The engine was called outside its expected lifecycle.
    #[error("illegal state: {0}")]
    IllegalState(IllegalStateKind),
}

impl CombatError {
    pub(crate) const fn invalid(action: ActionId, reason: InvalidActionReason) -> Self {
        Self::InvalidAction { action, reason }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAction {
                reason: InvalidActionReason::WrongTarget(_),
                ..
            } => ErrorSeverity::Validation,
            Self::InvalidAction { .. } => ErrorSeverity::Recoverable,
            Self::IllegalState(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAction { reason, .. } => reason.error_code(),
            Self::IllegalState(IllegalStateKind::SessionFinished { .. }) => {
                "COMBAT_SESSION_FINISHED"
            }
            Self::IllegalState(IllegalStateKind::SessionOngoing) => "COMBAT_SESSION_ONGOING",
        }
    }
}

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidActionReason {
    #[error("not part of this character's kit")]
    NotInKit,

    #[error("target must be grappled")]
    TargetNotGrappled,

    #[error("target is already grappled")]
    TargetAlreadyGrappled,

    #[error("rewind was already used this encounter")]
    RewindSpent,

    #[error("buff is already active")]
    BuffActive,

    #[error("already in that form")]
    AlreadyInForm,

    #[error("{0} is not a valid target")]
    WrongTarget(Side),
}

impl InvalidActionReason {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotInKit => "ACTION_NOT_IN_KIT",
            Self::TargetNotGrappled => "ACTION_TARGET_NOT_GRAPPLED",
            Self::TargetAlreadyGrappled => "ACTION_TARGET_ALREADY_GRAPPLED",
            Self::RewindSpent => "ACTION_REWIND_SPENT",
            Self::BuffActive => "ACTION_BUFF_ACTIVE",
            Self::AlreadyInForm => "ACTION_ALREADY_IN_FORM",
            Self::WrongTarget(_) => "ACTION_WRONG_TARGET",
        }
    }
}

/// Lifecycle violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalStateKind {
    #[error("session already finished ({outcome})")]
    SessionFinished { outcome: CombatOutcome },

    #[error("session is still ongoing")]
    SessionOngoing,
}

/// Result type alias for combat operations.
pub type CombatResult<T> = Result<T, CombatError>;
