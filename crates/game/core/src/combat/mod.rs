//! Combat resolution.
//!
//! Everything here is a plain function over `&mut` combatants and a
//! [`RoundContext`](crate::round::RoundContext). Randomness comes only from
//! the `&mut dyn RandomSource` argument; narration only goes into the
//! context's event list.
//!
//! # Core Functions
//!
//! - `resolve_round`: speed ordering, dispatch, deferred counters
//! - `resolve_clash`: coin-flip contest when both sides strike
//! - `resolve_attack`: block check, roll, mitigation, post-hit hooks
//! - `check_outcome` / `end_round`: termination and reset

pub mod abilities;
pub mod attack;
pub mod clash;
pub mod damage;
pub mod lifecycle;
pub mod resolver;

pub use attack::{AttackOutcome, resolve_attack};
pub use clash::{ClashOutcome, resolve_clash, resolve_clash_between};
pub use damage::{DamageKind, DamageRoll, mitigate};
pub use lifecycle::{CombatOutcome, begin_round, check_outcome, conclude_encounter, end_round};
pub use resolver::{TurnEntry, resolve_round, turn_order};
