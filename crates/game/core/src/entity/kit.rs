//! Character kits and their trait hooks.
//!
//! A [`Kit`] identifies which character variant a combatant plays. Each kit
//! declares the set of hooks it implements ([`KitHooks`]); the engine checks
//! that set before calling a hook, so characters without a mechanic never
//! enter its code path. Per-kit mutable state lives in [`KitState`] inside
//! the status bag.

use bitflags::bitflags;

use crate::action::ActionId;
use crate::combat::{DamageKind, DamageRoll};
use crate::config::CombatConfig;
use crate::round::{CombatEvent, RoundContext};

use super::Combatant;

bitflags! {
    /// Hook points a kit can register.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct KitHooks: u16 {
        /// Adjust incoming damage before defense mitigation.
        const PRE_DAMAGE = 1 << 0;
        /// Add situational bonuses to damage rolls.
        const ROLL_BONUS = 1 << 1;
        /// React after one of this combatant's attacks lands.
        const POST_HIT = 1 << 2;
        /// Multiply coins flipped and clash bonus damage.
        const CLASH_COINS = 1 << 3;
        /// Follow-up after winning a clash.
        const CLASH_WIN = 1 << 4;
        /// Prepare state at the start of each round.
        const ROUND_START = 1 << 5;
        /// Decay multi-round counters at the end of each round.
        const ROUND_END = 1 << 6;
        /// May force every coin to land heads.
        const ALWAYS_HEADS = 1 << 7;
        /// Any guard arms a free counter against a strike this round.
        const GUARD_COUNTER = 1 << 8;
    }
}

/// Character variant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Kit {
    /// Plain enemy: strike or guard, no traits.
    #[default]
    Grunt,
    /// Grappler with a guard-counter and the Old One-Two.
    Balter,
    /// Fast striker with Momentum stacks and the Skipper buff.
    Striker,
    /// Psychic fighter with Misty stacks and a once-per-encounter Rewind.
    ShutenMaru,
    /// Form-switching weapon user with doubled clash coins.
    Zect,
}

impl Kit {
    /// Hooks this kit implements.
    pub const fn hooks(self) -> KitHooks {
        match self {
            Kit::Grunt => KitHooks::empty(),
            Kit::Balter => KitHooks::CLASH_WIN.union(KitHooks::GUARD_COUNTER),
            Kit::Striker => KitHooks::ROLL_BONUS
                .union(KitHooks::POST_HIT)
                .union(KitHooks::CLASH_WIN)
                .union(KitHooks::ROUND_END)
                .union(KitHooks::ALWAYS_HEADS),
            Kit::ShutenMaru => KitHooks::PRE_DAMAGE
                .union(KitHooks::ROLL_BONUS)
                .union(KitHooks::POST_HIT),
            Kit::Zect => KitHooks::CLASH_COINS
                .union(KitHooks::POST_HIT)
                .union(KitHooks::ROUND_START),
        }
    }

    /// Every action in the kit, in menu order. Availability still depends on state.
    pub const fn actions(self) -> &'static [ActionId] {
        match self {
            Kit::Grunt => &[ActionId::Attack, ActionId::Guard],
            Kit::Balter => &[
                ActionId::Guard,
                ActionId::Haymaker,
                ActionId::Grapple,
                ActionId::Piledriver,
                ActionId::IronGuard,
            ],
            Kit::Striker => &[
                ActionId::Guard,
                ActionId::Jab,
                ActionId::HeavyBlow,
                ActionId::Skipper,
            ],
            Kit::ShutenMaru => &[
                ActionId::Guard,
                ActionId::ChronoFist,
                ActionId::Phase,
                ActionId::Rewind,
            ],
            Kit::Zect => &[
                ActionId::Guard,
                ActionId::Reap,
                ActionId::SwitchScythe,
                ActionId::SwitchTrident,
                ActionId::SwitchHammer,
            ],
        }
    }

    /// The kit's basic attack; two strikes in one round start a clash.
    pub const fn strike(self) -> ActionId {
        match self {
            Kit::Grunt => ActionId::Attack,
            Kit::Balter => ActionId::Haymaker,
            Kit::Striker => ActionId::Jab,
            Kit::ShutenMaru => ActionId::ChronoFist,
            Kit::Zect => ActionId::Reap,
        }
    }

    pub fn has_action(self, action: ActionId) -> bool {
        self.actions().contains(&action)
    }
}

/// Zect's weapon forms.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ZectForm {
    /// Heals for half the damage its hits deal.
    #[default]
    Scythe,
    /// Arms a one-shot clash bonus at the start of each round.
    Trident,
    /// Raises base defense while held.
    Hammer,
}

/// Per-kit mechanic state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KitState {
    #[default]
    None,
    Striker {
        /// Bonus added to physical rolls, consumed when an attack lands.
        momentum: u32,
        /// Remaining rounds of the Skipper buff.
        skipper_turns: u32,
    },
    ShutenMaru {
        /// Damage-reduction stacks, all consumed by the next hit taken.
        misty_stacks: u32,
        rewind_used: bool,
    },
    Zect {
        form: ZectForm,
    },
}

impl KitState {
    pub fn for_kit(kit: Kit) -> Self {
        match kit {
            Kit::Grunt | Kit::Balter => KitState::None,
            Kit::Striker => KitState::Striker {
                momentum: 0,
                skipper_turns: 0,
            },
            Kit::ShutenMaru => KitState::ShutenMaru {
                misty_stacks: 0,
                rewind_used: false,
            },
            Kit::Zect => KitState::Zect {
                form: ZectForm::Scythe,
            },
        }
    }

    pub fn skipper_active(&self) -> bool {
        matches!(self, KitState::Striker { skipper_turns, .. } if *skipper_turns > 0)
    }

    pub fn rewind_used(&self) -> bool {
        matches!(self, KitState::ShutenMaru { rewind_used: true, .. })
    }

    pub fn form(&self) -> Option<ZectForm> {
        match self {
            KitState::Zect { form } => Some(*form),
            _ => None,
        }
    }

    /// Drop everything scoped to one encounter. Zect keeps its form.
    pub(crate) fn clear_encounter(&mut self) {
        match self {
            KitState::None | KitState::Zect { .. } => {}
            KitState::Striker {
                momentum,
                skipper_turns,
            } => {
                *momentum = 0;
                *skipper_turns = 0;
            }
            KitState::ShutenMaru {
                misty_stacks,
                rewind_used,
            } => {
                *misty_stacks = 0;
                *rewind_used = false;
            }
        }
    }
}

/// Modifiers a kit contributes to a single damage roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RollModifiers {
    pub bonus: u32,
    pub double_natural: bool,
}

// ============================================================================
// Hook implementations
// ============================================================================

impl Combatant {
    /// PRE_DAMAGE: Misty stacks shave incoming damage and are consumed in full.
    pub(crate) fn mitigate_incoming(
        &mut self,
        amount: u32,
        _kind: DamageKind,
        ctx: &mut RoundContext<'_>,
    ) -> u32 {
        let KitState::ShutenMaru { misty_stacks, .. } = &mut self.status.kit else {
            return amount;
        };
        if *misty_stacks == 0 {
            return amount;
        }

        let stacks = core::mem::take(misty_stacks);
        ctx.push(CombatEvent::MistyDissipated {
            name: self.name.clone(),
            stacks,
        });
        amount
            .saturating_sub(stacks.saturating_mul(ctx.config.misty_reduction_per_stack))
            .max(1)
    }

    /// ROLL_BONUS: Momentum and Skipper add flat damage; Rewind doubles the die.
    pub(crate) fn roll_modifiers(&self, kind: DamageKind, ctx: &mut RoundContext<'_>) -> RollModifiers {
        let mut modifiers = RollModifiers::default();
        match &self.status.kit {
            KitState::Striker {
                momentum,
                skipper_turns,
            } => {
                if kind == DamageKind::Physical {
                    modifiers.bonus = modifiers.bonus.saturating_add(*momentum);
                }
                if *skipper_turns > 0 {
                    modifiers.bonus = modifiers.bonus.saturating_add(ctx.config.skipper_damage_bonus);
                }
            }
            KitState::ShutenMaru { .. } if ctx.rewind == Some(self.side) => {
                modifiers.double_natural = true;
                ctx.push(CombatEvent::RewindDoubled {
                    name: self.name.clone(),
                });
            }
            _ => {}
        }
        modifiers
    }

    /// POST_HIT: cleanup and rewards once one of this combatant's attacks lands.
    pub(crate) fn after_hit(
        &mut self,
        die: u32,
        kind: DamageKind,
        roll: DamageRoll,
        dealt: u32,
        ctx: &mut RoundContext<'_>,
    ) {
        match self.kit {
            Kit::Striker => {
                if kind == DamageKind::Physical {
                    if let KitState::Striker { momentum, .. } = &mut self.status.kit {
                        *momentum = 0;
                    }
                }
            }
            Kit::ShutenMaru => {
                if kind == DamageKind::Psychic && roll.natural == die {
                    let healed = self.heal(ctx.config.chrono_fist_heal);
                    ctx.push(CombatEvent::ChronoFistHeal {
                        name: self.name.clone(),
                        amount: healed,
                    });
                }
            }
            Kit::Zect => {
                if self.status.kit.form() == Some(ZectForm::Scythe) {
                    let healed = self.heal(dealt / 2);
                    if healed > 0 {
                        ctx.push(CombatEvent::ScytheHeal {
                            name: self.name.clone(),
                            amount: healed,
                        });
                    }
                }
            }
            Kit::Grunt | Kit::Balter => {}
        }
    }

    /// CLASH_COINS: Zect's Homogenous trait doubles coins and clash bonus.
    pub(crate) fn clash_multiplier(&self) -> u32 {
        if self.kit.hooks().contains(KitHooks::CLASH_COINS) {
            2
        } else {
            1
        }
    }

    /// ALWAYS_HEADS: Skipper turns every flip into heads.
    pub(crate) fn forces_heads(&self) -> bool {
        self.kit.hooks().contains(KitHooks::ALWAYS_HEADS) && self.status.kit.skipper_active()
    }

    /// ROUND_START: Trident arms its clash bonus for the coming round.
    pub(crate) fn on_round_start(&mut self, config: &CombatConfig) {
        if let KitState::Zect {
            form: ZectForm::Trident,
        } = self.status.kit
        {
            self.status.clash_bonus = config.trident_clash_bonus;
        }
    }

    /// ROUND_END: Skipper counts down and releases its held stats on expiry.
    pub(crate) fn on_round_end(&mut self, ctx: &mut RoundContext<'_>) {
        let KitState::Striker { skipper_turns, .. } = &mut self.status.kit else {
            return;
        };
        if *skipper_turns == 0 {
            return;
        }

        *skipper_turns -= 1;
        if *skipper_turns == 0 {
            self.status.held = Default::default();
            ctx.push(CombatEvent::SkipperEnded {
                name: self.name.clone(),
            });
        }
    }
}
