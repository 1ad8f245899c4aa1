//! Deterministic combat rules for a turn-based roguelite.
//!
//! `clash-core` resolves one round at a time between a player and an enemy:
//! speed ordering, the coin-flip clash, speed-gated guards, and each
//! character kit's hooks. It performs no I/O and never logs; every narrated
//! event is returned to the caller, and every random draw goes through an
//! injected [`RandomSource`].
//!
//! The entry point is [`CombatSession`]; the free functions in [`combat`]
//! are the building blocks it drives.
pub mod action;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod policy;
pub mod rng;
pub mod round;
pub mod session;

pub use action::{ActionClass, ActionId, available_actions, validate_action};
pub use combat::{
    AttackOutcome, ClashOutcome, CombatOutcome, DamageKind, DamageRoll, resolve_attack,
    resolve_clash, resolve_round,
};
pub use config::CombatConfig;
pub use entity::{
    CharacterTemplate, Combatant, CombatantSnapshot, Combatants, HeldModifiers, Kit, KitHooks,
    KitState, Side, StatusBag, ZectForm,
};
pub use error::{
    CombatError, CombatResult, ErrorSeverity, GameError, IllegalStateKind, InvalidActionReason,
};
pub use policy::{EnemyPolicy, FixedPolicy, WeightedPolicy};
pub use rng::{PcgRng, RandomSource, ScriptedRng};
pub use round::{CombatEvent, RoundContext};
pub use session::{CombatSession, RoundResult, RunProgress};
