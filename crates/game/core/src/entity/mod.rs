//! Entity model: combatant stats, resources and status.
//!
//! A [`Combatant`] is built from an immutable [`CharacterTemplate`] at
//! encounter start. Base stats never change mid-round; the *current* stats
//! are working copies that guard, grapple, and ability effects modify and
//! [`Combatant::end_of_round_reset`] restores.
//!
//! # Invariants
//!
//! - `0 <= hp <= max_hp`, and a combatant is alive iff `hp > 0`
//! - outside an active round, current stats equal base stats plus whatever a
//!   running multi-round buff holds open (and the grapple speed penalty)

pub mod kit;
pub mod status;
pub mod template;

pub use kit::{Kit, KitHooks, KitState, ZectForm};
pub use status::{HeldModifiers, StatusBag};
pub use template::CharacterTemplate;

use crate::combat::{DamageKind, DamageRoll, mitigate};
use crate::config::CombatConfig;
use crate::rng::RandomSource;
use crate::round::{CombatEvent, RoundContext};

/// Which side of the encounter a combatant fights for.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// A character taking part in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub side: Side,
    pub name: String,
    pub kit: Kit,

    current_hp: u32,
    max_hp: u32,

    /// Attack die size.
    pub attack: u32,

    pub base_defense: u32,
    pub base_speed: u32,
    pub base_coin_flips: u32,

    pub defense: u32,
    pub speed: u32,
    pub coin_flips: u32,

    pub status: StatusBag,
}

impl Combatant {
    pub fn from_template(side: Side, template: &CharacterTemplate) -> Self {
        Self {
            side,
            name: template.name.clone(),
            kit: template.kit,
            current_hp: template.max_hp,
            max_hp: template.max_hp,
            attack: template.attack,
            base_defense: template.defense,
            base_speed: template.speed,
            base_coin_flips: template.coin_flips,
            defense: template.defense,
            speed: template.speed,
            coin_flips: template.coin_flips,
            status: StatusBag::new(KitState::for_kit(template.kit)),
        }
    }

    pub fn hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Restore HP, capped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// Apply incoming damage and return the HP actually removed.
    ///
    /// Pre-damage kit hooks run before defense mitigation. Effective damage
    /// and HP are both floored at zero.
    pub fn apply_damage(
        &mut self,
        amount: u32,
        kind: DamageKind,
        ignore_defense: bool,
        ctx: &mut RoundContext<'_>,
    ) -> u32 {
        let mut incoming = amount;
        if self.kit.hooks().contains(KitHooks::PRE_DAMAGE) {
            incoming = self.mitigate_incoming(incoming, kind, ctx);
        }

        let defense = if ignore_defense { 0 } else { self.defense };
        let removed = mitigate(incoming, defense).min(self.current_hp);
        self.current_hp -= removed;
        removed
    }

    /// Roll this combatant's damage on a die of `die` sides.
    pub fn roll_damage(
        &self,
        die: u32,
        kind: DamageKind,
        ctx: &mut RoundContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> DamageRoll {
        let natural = rng.roll_die(die);
        if !self.kit.hooks().contains(KitHooks::ROLL_BONUS) {
            return DamageRoll::plain(natural);
        }

        let modifiers = self.roll_modifiers(kind, ctx);
        DamageRoll::new(natural, modifiers.double_natural, modifiers.bonus)
    }

    /// Raise defense for the rest of the round. Kits with a guard-counter arm it.
    pub fn begin_guard(&mut self, ctx: &mut RoundContext<'_>) {
        let arm_counter = self.kit.hooks().contains(KitHooks::GUARD_COUNTER);
        let bonus = ctx.config.guard_defense_bonus;
        self.status.guard_bonus = self.status.guard_bonus.saturating_add(bonus);
        self.defense = self.defense.saturating_add(bonus);
        self.status.counter_armed = arm_counter;

        ctx.push(CombatEvent::Guarded {
            name: self.name.clone(),
            bonus,
            counter: arm_counter,
        });
    }

    /// Restore current stats, clear one-round flags and decay buff counters.
    pub fn end_of_round_reset(&mut self, ctx: &mut RoundContext<'_>) {
        if self.kit.hooks().contains(KitHooks::ROUND_END) {
            self.on_round_end(ctx);
        }
        self.status.clear_round_flags();
        self.restore_stats(ctx.config);
    }

    /// Prepare the combatant for the coming round.
    pub fn begin_round(&mut self, config: &CombatConfig) {
        if self.status.stagger_pending {
            self.status.stagger_pending = false;
            self.status.staggered = true;
        }
        if self.kit.hooks().contains(KitHooks::ROUND_START) {
            self.on_round_start(config);
        }
    }

    /// Clear every encounter-scoped status and restore stats. HP persists.
    pub fn clear_encounter_state(&mut self, config: &CombatConfig) {
        self.status.clear_encounter();
        self.restore_stats(config);
    }

    /// Recompute current stats from base stats and what is still in effect.
    pub(crate) fn restore_stats(&mut self, config: &CombatConfig) {
        let held = self.status.held;
        self.defense = HeldModifiers::apply(self.base_defense, held.defense);
        self.coin_flips = HeldModifiers::apply(self.base_coin_flips, held.coin_flips);
        self.speed = if self.status.is_grappled() {
            grappled_speed(self.base_speed, config)
        } else {
            self.base_speed
        };
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            side: self.side,
            name: self.name.clone(),
            hp: self.current_hp,
            max_hp: self.max_hp,
            alive: self.is_alive(),
            defense: self.defense,
            speed: self.speed,
            coin_flips: self.coin_flips,
            grappled: self.status.is_grappled(),
            staggered: self.status.staggered,
            kit: self.status.kit.clone(),
        }
    }
}

/// Speed of a grappled combatant: base minus the penalty, floored at 1.
pub(crate) fn grappled_speed(base_speed: u32, config: &CombatConfig) -> u32 {
    base_speed
        .saturating_sub(config.grapple_speed_penalty)
        .max(1)
}

/// Read-only view of a combatant for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub side: Side,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub alive: bool,
    pub defense: u32,
    pub speed: u32,
    pub coin_flips: u32,
    pub grappled: bool,
    pub staggered: bool,
    pub kit: KitState,
}

/// The two combatants of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatants {
    pub player: Combatant,
    pub enemy: Combatant,
}

impl Combatants {
    pub fn new(player: Combatant, enemy: Combatant) -> Self {
        Self { player, enemy }
    }

    pub fn get(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Borrow `(actor, opponent)` mutably at once.
    pub fn split_mut(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant) {
        match actor {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;
    use crate::rng::ScriptedRng;

    fn ctx(config: &CombatConfig) -> RoundContext<'_> {
        RoundContext::new(config, 1, ActionId::Guard, ActionId::Attack)
    }

    fn grunt(side: Side) -> Combatant {
        Combatant::from_template(side, &CharacterTemplate::goblin_grunt())
    }

    #[test]
    fn defense_mitigates_and_floors_at_zero() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut goblin = grunt(Side::Enemy);

        assert_eq!(goblin.apply_damage(7, DamageKind::Physical, false, &mut ctx), 5);
        assert_eq!(goblin.hp(), 25);

        assert_eq!(goblin.apply_damage(1, DamageKind::Physical, false, &mut ctx), 0);
        assert_eq!(goblin.hp(), 25);

        assert_eq!(goblin.apply_damage(7, DamageKind::Physical, true, &mut ctx), 7);
        assert_eq!(goblin.hp(), 18);
    }

    #[test]
    fn lethal_damage_clamps_hp_and_kills() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut goblin = grunt(Side::Enemy);

        let removed = goblin.apply_damage(500, DamageKind::Physical, false, &mut ctx);
        assert_eq!(removed, 30);
        assert_eq!(goblin.hp(), 0);
        assert!(!goblin.is_alive());
    }

    #[test]
    fn heal_caps_at_max() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut goblin = grunt(Side::Enemy);

        goblin.apply_damage(6, DamageKind::Physical, true, &mut ctx);
        assert_eq!(goblin.heal(10), 6);
        assert_eq!(goblin.hp(), goblin.max_hp());
    }

    #[test]
    fn misty_stacks_are_consumed_by_first_hit() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut shuten = Combatant::from_template(Side::Player, &CharacterTemplate::shuten_maru());
        shuten.status.kit = KitState::ShutenMaru {
            misty_stacks: 2,
            rewind_used: false,
        };

        // 12 - 2*2 = 8, minus 5 defense
        assert_eq!(shuten.apply_damage(12, DamageKind::Physical, false, &mut ctx), 3);
        assert_eq!(
            shuten.status.kit,
            KitState::ShutenMaru {
                misty_stacks: 0,
                rewind_used: false
            }
        );
        assert!(matches!(
            ctx.events(),
            [CombatEvent::MistyDissipated { stacks: 2, .. }]
        ));

        // second hit is unmitigated
        assert_eq!(shuten.apply_damage(12, DamageKind::Physical, false, &mut ctx), 7);
    }

    #[test]
    fn misty_never_reduces_below_one() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut shuten = Combatant::from_template(Side::Player, &CharacterTemplate::shuten_maru());
        shuten.status.kit = KitState::ShutenMaru {
            misty_stacks: 3,
            rewind_used: false,
        };

        assert_eq!(shuten.apply_damage(4, DamageKind::Physical, true, &mut ctx), 1);
    }

    #[test]
    fn oversized_misty_reduction_saturates() {
        let config = CombatConfig {
            misty_reduction_per_stack: 2_000_000_000,
            ..CombatConfig::default()
        };
        let mut ctx = ctx(&config);
        let mut shuten = Combatant::from_template(Side::Player, &CharacterTemplate::shuten_maru());
        shuten.status.kit = KitState::ShutenMaru {
            misty_stacks: 3,
            rewind_used: false,
        };

        assert_eq!(shuten.apply_damage(50, DamageKind::Physical, true, &mut ctx), 1);
    }

    #[test]
    fn striker_roll_adds_momentum_and_skipper() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut striker = Combatant::from_template(Side::Player, &CharacterTemplate::striker());
        striker.status.kit = KitState::Striker {
            momentum: 2,
            skipper_turns: 1,
        };
        let mut rng = ScriptedRng::new([ScriptedRng::face(4), ScriptedRng::face(4)]);

        let physical = striker.roll_damage(6, DamageKind::Physical, &mut ctx, &mut rng);
        assert_eq!(physical.total(), 4 + 2 + 2);

        let psychic = striker.roll_damage(6, DamageKind::Psychic, &mut ctx, &mut rng);
        assert_eq!(psychic.total(), 4 + 2);
    }

    #[test]
    fn rewind_round_doubles_the_natural_roll() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        ctx.rewind = Some(Side::Player);
        let shuten = Combatant::from_template(Side::Player, &CharacterTemplate::shuten_maru());
        let mut rng = ScriptedRng::new([ScriptedRng::face(5)]);

        let roll = shuten.roll_damage(8, DamageKind::Psychic, &mut ctx, &mut rng);
        assert_eq!(roll.natural, 5);
        assert_eq!(roll.total(), 10);
        assert!(matches!(ctx.events(), [CombatEvent::RewindDoubled { .. }]));
    }

    #[test]
    fn guard_then_reset_restores_base_stats() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut balter = Combatant::from_template(Side::Player, &CharacterTemplate::balter());

        balter.begin_guard(&mut ctx);
        assert_eq!(balter.defense, 11);
        assert!(balter.status.counter_armed);

        balter.speed += 5;
        balter.end_of_round_reset(&mut ctx);
        assert_eq!(balter.defense, balter.base_defense);
        assert_eq!(balter.speed, balter.base_speed);
        assert!(!balter.status.counter_armed);
    }

    #[test]
    fn skipper_holds_stats_until_expiry() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut striker = Combatant::from_template(Side::Player, &CharacterTemplate::striker());
        striker.status.kit = KitState::Striker {
            momentum: 0,
            skipper_turns: 2,
        };
        striker.status.held = HeldModifiers {
            defense: -2,
            coin_flips: 1,
        };

        striker.end_of_round_reset(&mut ctx);
        assert_eq!(striker.defense, 2);
        assert_eq!(striker.coin_flips, 2);

        striker.end_of_round_reset(&mut ctx);
        assert_eq!(striker.defense, striker.base_defense);
        assert_eq!(striker.coin_flips, striker.base_coin_flips);
        assert!(striker.status.held.is_empty());
        assert!(
            ctx.events()
                .iter()
                .any(|e| matches!(e, CombatEvent::SkipperEnded { .. }))
        );
    }

    #[test]
    fn grapple_penalty_survives_round_reset() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut goblin = grunt(Side::Enemy);
        goblin.status.grappled_by = Some(Side::Player);

        goblin.end_of_round_reset(&mut ctx);
        assert_eq!(goblin.speed, 1);

        goblin.clear_encounter_state(&config);
        assert_eq!(goblin.speed, goblin.base_speed);
    }

    #[test]
    fn stagger_takes_effect_next_round() {
        let config = CombatConfig::default();
        let mut ctx = ctx(&config);
        let mut goblin = grunt(Side::Enemy);
        goblin.status.stagger_pending = true;

        goblin.end_of_round_reset(&mut ctx);
        assert!(!goblin.status.staggered);

        goblin.begin_round(&config);
        assert!(goblin.status.staggered);
        assert!(!goblin.status.stagger_pending);

        goblin.end_of_round_reset(&mut ctx);
        goblin.begin_round(&config);
        assert!(!goblin.status.staggered);
    }
}
