//! Transient status tracked per combatant.
//!
//! Flags fall into three lifetimes:
//! - **one round**: guard bonus, counter eligibility, speed bonus, clash bonus, stagger
//! - **until released**: grapple references
//! - **multi-round**: buff counters in [`KitState`], with their stat deltas in [`HeldModifiers`]
//!
//! Everything is cleared (not dropped) by explicit resets; nothing here is
//! ever destroyed mid-encounter.

use super::Side;
use super::kit::KitState;

/// Stat deltas a multi-round buff keeps applied across round resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldModifiers {
    pub defense: i32,
    pub coin_flips: i32,
}

impl HeldModifiers {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply a held delta to a base stat, clamped at zero.
    pub fn apply(base: u32, delta: i32) -> u32 {
        base.saturating_add_signed(delta)
    }
}

/// Status bag: every named transient flag and counter on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusBag {
    /// Side holding this combatant in a grapple.
    pub grappled_by: Option<Side>,
    /// Side this combatant is holding in a grapple.
    pub grappling: Option<Side>,

    /// Forced to skip this round's action.
    pub staggered: bool,
    /// Becomes `staggered` at the next round start.
    pub stagger_pending: bool,

    /// Guard-counter armed for this round.
    pub counter_armed: bool,
    /// Defense added by guarding this round.
    pub guard_bonus: u32,
    /// Speed added by abilities this round.
    pub speed_bonus: u32,
    /// One-shot bonus added to this round's clash damage.
    pub clash_bonus: u32,

    pub held: HeldModifiers,
    pub kit: KitState,
}

impl StatusBag {
    pub fn new(kit: KitState) -> Self {
        Self {
            kit,
            ..Self::default()
        }
    }

    pub fn is_grappled(&self) -> bool {
        self.grappled_by.is_some()
    }

    /// Clear flags that only live for one round.
    pub(crate) fn clear_round_flags(&mut self) {
        self.staggered = false;
        self.counter_armed = false;
        self.guard_bonus = 0;
        self.speed_bonus = 0;
        self.clash_bonus = 0;
    }

    /// Clear everything scoped to an encounter.
    pub(crate) fn clear_encounter(&mut self) {
        self.clear_round_flags();
        self.grappled_by = None;
        self.grappling = None;
        self.stagger_pending = false;
        self.held = HeldModifiers::default();
        self.kit.clear_encounter();
    }
}
