//! Action identifiers and availability rules.
//!
//! Every action a combatant can commit to for a round is an [`ActionId`].
//! Which of them a combatant may pick right now is decided by
//! [`available_actions`] and enforced by [`validate_action`].

pub mod available;

pub use available::{available_actions, validate_action};

use crate::combat::DamageKind;
use crate::entity::ZectForm;

/// An action a combatant can commit to for one round.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionId {
    // ===== shared =====
    Attack,
    Guard,

    // ===== Balter =====
    Haymaker,
    Grapple,
    Piledriver,
    IronGuard,

    // ===== Striker =====
    Jab,
    HeavyBlow,
    Skipper,

    // ===== Shuten-Maru =====
    ChronoFist,
    Phase,
    Rewind,

    // ===== Zect =====
    Reap,
    SwitchScythe,
    SwitchTrident,
    SwitchHammer,

    /// Forced no-op for a staggered combatant.
    Staggered,
}

/// Broad category of an action, used by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionClass {
    /// Basic attack on the attack die. Two strikes in one round clash.
    Strike,
    /// Raises defense; blocks a slower attacker.
    Guard,
    Ability,
    Staggered,
}

impl ActionId {
    pub const fn class(self) -> ActionClass {
        match self {
            ActionId::Attack
            | ActionId::Haymaker
            | ActionId::Jab
            | ActionId::ChronoFist
            | ActionId::Reap => ActionClass::Strike,
            ActionId::Guard | ActionId::IronGuard => ActionClass::Guard,
            ActionId::Staggered => ActionClass::Staggered,
            ActionId::Grapple
            | ActionId::Piledriver
            | ActionId::HeavyBlow
            | ActionId::Skipper
            | ActionId::Phase
            | ActionId::Rewind
            | ActionId::SwitchScythe
            | ActionId::SwitchTrident
            | ActionId::SwitchHammer => ActionClass::Ability,
        }
    }

    pub const fn is_strike(self) -> bool {
        matches!(self.class(), ActionClass::Strike)
    }

    pub const fn is_guard(self) -> bool {
        matches!(self.class(), ActionClass::Guard)
    }

    /// Damage kind dealt by a strike.
    pub const fn damage_kind(self) -> DamageKind {
        match self {
            ActionId::ChronoFist | ActionId::Rewind => DamageKind::Psychic,
            _ => DamageKind::Physical,
        }
    }

    /// Form a switch action moves into.
    pub const fn target_form(self) -> Option<ZectForm> {
        match self {
            ActionId::SwitchScythe => Some(ZectForm::Scythe),
            ActionId::SwitchTrident => Some(ZectForm::Trident),
            ActionId::SwitchHammer => Some(ZectForm::Hammer),
            _ => None,
        }
    }
}
