//! Single-attack resolution: speed-gated block check, roll, mitigation.

use crate::entity::{Combatant, KitHooks};
use crate::rng::RandomSource;
use crate::round::{CombatEvent, RoundContext};

use super::damage::{DamageKind, DamageRoll};

/// Result of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// A faster guarding defender avoided the attack entirely.
    Blocked,
    Hit { roll: DamageRoll, dealt: u32 },
}

impl AttackOutcome {
    pub fn dealt(&self) -> u32 {
        match self {
            AttackOutcome::Blocked => 0,
            AttackOutcome::Hit { dealt, .. } => *dealt,
        }
    }
}

/// Resolve an attack of `attacker` against `defender` on a die of `die` sides.
///
/// # Block law
///
/// ```text
/// blocked = !free
///        && defender's action this round is guard-class
///        && defender.speed > attacker.speed
/// ```
///
/// A blocked attack rolls nothing and leaves the defender untouched. Free
/// attacks (grapple clash forfeits, counters) skip the check.
pub fn resolve_attack(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    die: u32,
    kind: DamageKind,
    free: bool,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> AttackOutcome {
    let guarding = ctx.action_of(defender.side).is_guard();
    if !free && guarding && defender.speed > attacker.speed {
        ctx.push(CombatEvent::Blocked {
            defender: defender.name.clone(),
        });
        return AttackOutcome::Blocked;
    }

    if defender.status.is_grappled() {
        ctx.push(CombatEvent::GrappledHindrance {
            name: defender.name.clone(),
        });
    }

    let roll = attacker.roll_damage(die, kind, ctx, rng);
    let dealt = defender.apply_damage(roll.total(), kind, false, ctx);
    ctx.push(CombatEvent::Hit {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        kind,
        dealt,
    });

    if attacker.kit.hooks().contains(KitHooks::POST_HIT) {
        attacker.after_hit(die, kind, roll, dealt, ctx);
    }

    AttackOutcome::Hit { roll, dealt }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;
    use crate::config::CombatConfig;
    use crate::entity::{CharacterTemplate, Kit, KitState, Side};
    use crate::rng::ScriptedRng;

    fn guard_player() -> Combatant {
        let template = CharacterTemplate::new("Warden", Kit::Grunt, 100, 6, 5, 10, 1);
        Combatant::from_template(Side::Player, &template)
    }

    #[test]
    fn faster_guard_blocks_the_attack() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Guard, ActionId::Attack);
        let mut player = guard_player();
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        player.begin_guard(&mut ctx);
        let outcome = resolve_attack(&mut goblin, &mut player, 8, DamageKind::Physical, false, &mut ctx, &mut rng);

        assert_eq!(outcome, AttackOutcome::Blocked);
        assert_eq!(player.hp(), 100);
        assert_eq!(rng.draws(), 0);
        assert!(ctx.events().last().unwrap().to_string().contains("successfully defended"));
    }

    #[test]
    fn free_attacks_ignore_the_block() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Guard, ActionId::Attack);
        let mut player = guard_player();
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        let outcome = resolve_attack(&mut goblin, &mut player, 8, DamageKind::Physical, true, &mut ctx, &mut rng);

        assert_eq!(outcome.dealt(), 3);
        assert_eq!(player.hp(), 97);
    }

    #[test]
    fn equal_speed_guard_does_not_block() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Attack, ActionId::Guard);
        let mut a = Combatant::from_template(Side::Player, &CharacterTemplate::goblin_grunt());
        let mut b = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        let mut rng = ScriptedRng::new([ScriptedRng::face(6)]);

        let outcome = resolve_attack(&mut a, &mut b, 8, DamageKind::Physical, false, &mut ctx, &mut rng);
        assert_eq!(outcome.dealt(), 4);
    }

    #[test]
    fn landing_a_physical_hit_spends_momentum() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Jab, ActionId::Guard);
        let mut striker = Combatant::from_template(Side::Player, &CharacterTemplate::striker());
        striker.status.kit = KitState::Striker {
            momentum: 3,
            skipper_turns: 0,
        };
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        let mut rng = ScriptedRng::new([ScriptedRng::face(2)]);

        let outcome = resolve_attack(&mut striker, &mut goblin, 6, DamageKind::Physical, false, &mut ctx, &mut rng);

        // 2 + 3 momentum - 2 defense
        assert_eq!(outcome.dealt(), 3);
        assert_eq!(
            striker.status.kit,
            KitState::Striker {
                momentum: 0,
                skipper_turns: 0
            }
        );
    }

    #[test]
    fn max_chrono_fist_heals() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::ChronoFist, ActionId::Guard);
        let mut shuten = Combatant::from_template(Side::Player, &CharacterTemplate::shuten_maru());
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        shuten.apply_damage(20, DamageKind::Physical, true, &mut ctx);
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        resolve_attack(&mut shuten, &mut goblin, 8, DamageKind::Psychic, false, &mut ctx, &mut rng);

        assert_eq!(shuten.hp(), 65);
        assert!(matches!(
            ctx.events().last(),
            Some(CombatEvent::ChronoFistHeal { amount: 5, .. })
        ));
    }

    #[test]
    fn scythe_heals_half_the_damage_dealt() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Reap, ActionId::Attack);
        let mut zect = Combatant::from_template(Side::Player, &CharacterTemplate::zect());
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        zect.apply_damage(20, DamageKind::Physical, true, &mut ctx);
        let mut rng = ScriptedRng::new([ScriptedRng::face(6)]);

        let outcome = resolve_attack(&mut zect, &mut goblin, 6, DamageKind::Physical, false, &mut ctx, &mut rng);

        // 6 - 2 defense, half of it back
        assert_eq!(outcome.dealt(), 4);
        assert_eq!(zect.hp(), 82);
        assert!(matches!(
            ctx.events().last(),
            Some(CombatEvent::ScytheHeal { amount: 2, .. })
        ));
    }

    #[test]
    fn scythe_heal_is_capped_at_max_hp() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Reap, ActionId::Attack);
        let mut zect = Combatant::from_template(Side::Player, &CharacterTemplate::zect());
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        zect.apply_damage(1, DamageKind::Physical, true, &mut ctx);
        let mut rng = ScriptedRng::new([ScriptedRng::face(20)]);

        let outcome = resolve_attack(&mut zect, &mut goblin, 20, DamageKind::Physical, false, &mut ctx, &mut rng);

        assert_eq!(outcome.dealt(), 18);
        assert_eq!(zect.hp(), zect.max_hp());
        assert!(matches!(
            ctx.events().last(),
            Some(CombatEvent::ScytheHeal { amount: 1, .. })
        ));
    }

}
