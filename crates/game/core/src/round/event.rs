//! Narrated combat events.
//!
//! Resolution never writes text anywhere; it returns an ordered list of
//! [`CombatEvent`] records. Each record renders to exactly one log line via
//! its `Display` impl.

use core::fmt;

use crate::action::ActionId;
use crate::combat::DamageKind;
use crate::entity::ZectForm;

/// One atomic event produced while resolving a round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum CombatEvent {
    // ===== clash =====
    ClashBegins,
    CoinsFlipped {
        name: String,
        coins: u32,
        heads: u32,
        /// Every coin was forced to heads.
        forced: bool,
    },
    ClashDraw {
        heads: u32,
    },
    DrawDamage {
        attacker: String,
        defender: String,
        dealt: u32,
    },
    /// A grappled combatant forfeits the clash.
    ClashNullified {
        grappled: String,
    },
    FreeAttack {
        attacker: String,
    },
    ClashWon {
        winner: String,
        winner_heads: u32,
        loser_heads: u32,
    },
    ClashHit {
        attacker: String,
        defender: String,
        base: u32,
        bonus: u32,
        dealt: u32,
    },
    HomogenousBonus {
        name: String,
    },
    OneTwo {
        attacker: String,
        dealt: u32,
    },
    MomentumGained {
        name: String,
        stacks: u32,
    },

    // ===== attacks =====
    Blocked {
        defender: String,
    },
    GrappledHindrance {
        name: String,
    },
    Hit {
        attacker: String,
        defender: String,
        kind: DamageKind,
        dealt: u32,
    },
    Guarded {
        name: String,
        bonus: u32,
        counter: bool,
    },
    CounterTriggered {
        name: String,
    },

    // ===== abilities =====
    GrappleSucceeded {
        target: String,
        roll: u32,
        resist: u32,
    },
    GrappleFailed {
        target: String,
        roll: u32,
        resist: u32,
    },
    Piledriver {
        target: String,
        dealt: u32,
    },
    PiledriverFailed,
    MistyDissipated {
        name: String,
        stacks: u32,
    },
    RewindDoubled {
        name: String,
    },
    Rewound {
        name: String,
    },
    ChronoFistHeal {
        name: String,
        amount: u32,
    },
    ScytheHeal {
        name: String,
        amount: u32,
    },
    Phased {
        name: String,
        stacks: u32,
    },
    SkipperStarted {
        name: String,
        rounds: u32,
    },
    SkipperEnded {
        name: String,
    },
    FormSwitched {
        name: String,
        form: ZectForm,
    },
    StaggerInflicted {
        target: String,
    },
    StaggeredSkip {
        name: String,
    },

    // ===== lifecycle =====
    Defeated {
        name: String,
    },
}

impl CombatEvent {
    /// Action the event is most closely tied to, if any.
    pub fn action(&self) -> Option<ActionId> {
        match self {
            CombatEvent::GrappleSucceeded { .. } | CombatEvent::GrappleFailed { .. } => {
                Some(ActionId::Grapple)
            }
            CombatEvent::Piledriver { .. } | CombatEvent::PiledriverFailed => {
                Some(ActionId::Piledriver)
            }
            CombatEvent::Rewound { .. } => Some(ActionId::Rewind),
            CombatEvent::Phased { .. } => Some(ActionId::Phase),
            CombatEvent::SkipperStarted { .. } => Some(ActionId::Skipper),
            CombatEvent::StaggeredSkip { .. } => Some(ActionId::Staggered),
            _ => None,
        }
    }

    /// HP removed by this event, for events that deal damage.
    pub fn damage_dealt(&self) -> Option<u32> {
        match self {
            CombatEvent::DrawDamage { dealt, .. }
            | CombatEvent::ClashHit { dealt, .. }
            | CombatEvent::OneTwo { dealt, .. }
            | CombatEvent::Hit { dealt, .. }
            | CombatEvent::Piledriver { dealt, .. } => Some(*dealt),
            _ => None,
        }
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::ClashBegins => write!(f, "CLASH! Both attack!"),
            CombatEvent::CoinsFlipped {
                name,
                coins,
                heads,
                forced,
            } => {
                if *forced {
                    write!(f, "{name}'s Skipper: all {coins} flips are heads!")
                } else {
                    write!(f, "{name} flips {coins} coins and gets {heads} heads.")
                }
            }
            CombatEvent::ClashDraw { heads } => {
                write!(f, "The clash is a draw at {heads} heads! Both take damage.")
            }
            CombatEvent::DrawDamage {
                attacker,
                defender,
                dealt,
            } => write!(f, "{defender} takes {dealt} damage from {attacker}."),
            CombatEvent::ClashNullified { grappled } => write!(
                f,
                "The clash is nullified! {grappled} automatically fails the clash due to grapple."
            ),
            CombatEvent::FreeAttack { attacker } => write!(f, "{attacker} gets a free attack."),
            CombatEvent::ClashWon {
                winner,
                winner_heads,
                loser_heads,
            } => write!(f, "{winner} wins the clash {winner_heads}-{loser_heads}!"),
            CombatEvent::ClashHit {
                attacker,
                defender,
                base,
                bonus,
                dealt,
            } => write!(
                f,
                "{attacker} hits {defender} for {dealt} damage (base: {base}, bonus: {bonus})."
            ),
            CombatEvent::HomogenousBonus { name } => {
                write!(f, "{name}'s Homogenous trait doubles the clash bonus damage!")
            }
            CombatEvent::OneTwo { attacker, dealt } => {
                write!(f, "{attacker}'s Old One-Two! Extra hit for {dealt} damage!")
            }
            CombatEvent::MomentumGained { name, stacks } => {
                write!(f, "{name} gains a stack of Momentum ({stacks}).")
            }
            CombatEvent::Blocked { defender } => write!(
                f,
                "{defender} is faster and successfully defended! The attack misses."
            ),
            CombatEvent::GrappledHindrance { name } => {
                write!(f, "{name} is grappled, reducing their maneuverability.")
            }
            CombatEvent::Hit {
                attacker,
                defender,
                kind,
                dealt,
            } => write!(f, "{attacker} attacks {defender} ({kind}) for {dealt} damage!"),
            CombatEvent::Guarded {
                name,
                bonus,
                counter,
            } => {
                if *counter {
                    write!(f, "{name} braces with Iron Guard (+{bonus} defense).")
                } else {
                    write!(f, "{name} guards (+{bonus} defense).")
                }
            }
            CombatEvent::CounterTriggered { name } => {
                write!(f, "{name}'s Iron Guard triggers a free counter!")
            }
            CombatEvent::GrappleSucceeded {
                target,
                roll,
                resist,
            } => write!(
                f,
                "Grapple success ({roll} vs {resist})! {target}'s speed is reduced and all clashes will fail."
            ),
            CombatEvent::GrappleFailed {
                target,
                roll,
                resist,
            } => write!(
                f,
                "Grapple failed ({roll} vs {resist}). {target} resisted the attempt!"
            ),
            CombatEvent::Piledriver { target, dealt } => {
                write!(f, "PILEDRIVER! {target} takes {dealt} damage! Grapple ends.")
            }
            CombatEvent::PiledriverFailed => write!(f, "Piledriver requires a grapple and failed!"),
            CombatEvent::MistyDissipated { name, stacks } => {
                write!(f, "{name}'s Misty absorbs the blow ({stacks} stacks dissipate).")
            }
            CombatEvent::RewindDoubled { name } => {
                write!(f, "Rewind doubles {name}'s roll!")
            }
            CombatEvent::Rewound { name } => {
                write!(f, "{name} rewinds time and surges forward!")
            }
            CombatEvent::ChronoFistHeal { name, amount } => {
                write!(f, "{name}'s Chrono-Fist triggers! Heals for {amount}.")
            }
            CombatEvent::ScytheHeal { name, amount } => {
                write!(f, "{name}'s scythe drinks deep, healing {amount}.")
            }
            CombatEvent::Phased { name, stacks } => {
                write!(f, "{name} phases out of step (Misty {stacks}).")
            }
            CombatEvent::SkipperStarted { name, rounds } => {
                write!(f, "{name} starts skipping! Every flip is heads for {rounds} rounds.")
            }
            CombatEvent::SkipperEnded { name } => write!(f, "{name}'s Skipper wears off."),
            CombatEvent::FormSwitched { name, form } => {
                write!(f, "{name} switches to the {form} form.")
            }
            CombatEvent::StaggerInflicted { target } => {
                write!(f, "{target} is staggered and will lose their next action!")
            }
            CombatEvent::StaggeredSkip { name } => {
                write!(f, "{name} is staggered and cannot act.")
            }
            CombatEvent::Defeated { name } => write!(f, "{name} is defeated!"),
        }
    }
}
