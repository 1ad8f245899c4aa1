//! Character abilities layered on top of the resolver.
//!
//! Handlers take the acting combatant, its opponent and the round context.
//! Kit membership is checked by [`crate::action::validate_action`] before
//! the round starts, not here.

use crate::action::ActionId;
use crate::config::CombatConfig;
use crate::entity::{Combatant, HeldModifiers, Kit, KitState, ZectForm, grappled_speed};
use crate::rng::RandomSource;
use crate::round::{CombatEvent, RoundContext};

use super::attack::resolve_attack;
use super::damage::DamageKind;

// ============================================================================
// Pre-ordering effects
// ============================================================================

/// Apply speed changes that take effect before the round is ordered.
pub(crate) fn apply_priority(actor: &mut Combatant, action: ActionId, config: &CombatConfig) {
    if matches!(action, ActionId::Phase | ActionId::Rewind) {
        let bonus = config.phase_speed_bonus;
        actor.status.speed_bonus = actor.status.speed_bonus.saturating_add(bonus);
        actor.speed = actor.speed.saturating_add(bonus);
    }
}

// ============================================================================
// Grapple
// ============================================================================

/// Restrain: the grappler's roll must strictly beat the target's resist roll.
pub fn grapple(
    actor: &mut Combatant,
    target: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> bool {
    let roll = rng.roll_die(ctx.config.grapple_attacker_die);
    let resist = rng.roll_die(ctx.config.grapple_resist_die);

    if roll <= resist {
        ctx.push(CombatEvent::GrappleFailed {
            target: target.name.clone(),
            roll,
            resist,
        });
        return false;
    }

    target.status.grappled_by = Some(actor.side);
    actor.status.grappling = Some(target.side);
    target.speed = grappled_speed(target.base_speed, ctx.config);
    ctx.push(CombatEvent::GrappleSucceeded {
        target: target.name.clone(),
        roll,
        resist,
    });
    true
}

/// Finisher: fixed defense-ignoring damage that ends the grapple.
///
/// Re-checks the grapple at execution time and does nothing if it is gone.
pub fn piledriver(actor: &mut Combatant, target: &mut Combatant, ctx: &mut RoundContext<'_>) -> u32 {
    if target.status.grappled_by != Some(actor.side) {
        ctx.push(CombatEvent::PiledriverFailed);
        return 0;
    }

    let dealt = target.apply_damage(
        ctx.config.piledriver_damage,
        DamageKind::Physical,
        true,
        ctx,
    );
    release_grapple(actor, target);
    ctx.push(CombatEvent::Piledriver {
        target: target.name.clone(),
        dealt,
    });
    dealt
}

/// Drop both grapple references and give the target its speed back.
pub fn release_grapple(grappler: &mut Combatant, target: &mut Combatant) {
    grappler.status.grappling = None;
    target.status.grappled_by = None;
    target.speed = target.base_speed.saturating_add(target.status.speed_bonus);
}

// ============================================================================
// Striker
// ============================================================================

/// Heavy Blow: a bigger die; a hit that deals damage staggers the target.
pub fn heavy_blow(
    actor: &mut Combatant,
    target: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> u32 {
    let die = actor.attack.saturating_add(ctx.config.heavy_blow_die_bonus);
    let dealt = resolve_attack(actor, target, die, DamageKind::Physical, false, ctx, rng).dealt();

    if dealt > 0 && target.is_alive() {
        target.status.stagger_pending = true;
        ctx.push(CombatEvent::StaggerInflicted {
            target: target.name.clone(),
        });
    }
    dealt
}

/// Skipper: a multi-round buff that holds its stat deltas until expiry.
pub fn skipper(actor: &mut Combatant, ctx: &mut RoundContext<'_>) {
    let config = ctx.config;
    let KitState::Striker { skipper_turns, .. } = &mut actor.status.kit else {
        return;
    };
    *skipper_turns = config.skipper_duration;

    let held = HeldModifiers {
        defense: -i32::try_from(config.skipper_defense_penalty).unwrap_or(i32::MAX),
        coin_flips: i32::try_from(config.skipper_coin_bonus).unwrap_or(i32::MAX),
    };
    actor.status.held = held;
    actor.defense = HeldModifiers::apply(actor.defense, held.defense);
    actor.coin_flips = HeldModifiers::apply(actor.coin_flips, held.coin_flips);

    ctx.push(CombatEvent::SkipperStarted {
        name: actor.name.clone(),
        rounds: config.skipper_duration,
    });
}

// ============================================================================
// Shuten-Maru
// ============================================================================

/// Phase: gain a Misty stack. The speed bonus was applied before ordering.
pub fn phase(actor: &mut Combatant, ctx: &mut RoundContext<'_>) {
    let cap = ctx.config.misty_cap;
    let KitState::ShutenMaru { misty_stacks, .. } = &mut actor.status.kit else {
        return;
    };
    *misty_stacks = misty_stacks.saturating_add(1).min(cap);
    let stacks = *misty_stacks;

    ctx.push(CombatEvent::Phased {
        name: actor.name.clone(),
        stacks,
    });
}

/// Rewind: once per encounter, double this round's natural rolls and strike.
pub fn rewind(
    actor: &mut Combatant,
    target: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> u32 {
    if let KitState::ShutenMaru { rewind_used, .. } = &mut actor.status.kit {
        *rewind_used = true;
    }
    ctx.rewind = Some(actor.side);
    ctx.push(CombatEvent::Rewound {
        name: actor.name.clone(),
    });

    let die = actor.attack;
    resolve_attack(actor, target, die, DamageKind::Psychic, false, ctx, rng).dealt()
}

// ============================================================================
// Zect
// ============================================================================

/// Switch weapon form. Hammer's defense bonus moves with the form.
pub fn switch_form(actor: &mut Combatant, form: ZectForm, ctx: &mut RoundContext<'_>) {
    let bonus = ctx.config.hammer_defense_bonus;
    let KitState::Zect { form: current } = &mut actor.status.kit else {
        return;
    };
    let previous = core::mem::replace(current, form);

    if previous == ZectForm::Hammer {
        actor.base_defense = actor.base_defense.saturating_sub(bonus);
        actor.defense = actor.defense.saturating_sub(bonus);
    }
    if previous == ZectForm::Trident {
        actor.status.clash_bonus = 0;
    }
    if form == ZectForm::Hammer {
        actor.base_defense = actor.base_defense.saturating_add(bonus);
        actor.defense = actor.defense.saturating_add(bonus);
    }

    ctx.push(CombatEvent::FormSwitched {
        name: actor.name.clone(),
        form,
    });
}

// ============================================================================
// Clash-win traits
// ============================================================================

/// CLASH_WIN: Balter's Old One-Two and Striker's Momentum.
pub(crate) fn on_clash_win(
    winner: &mut Combatant,
    loser: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) {
    match winner.kit {
        Kit::Balter => {
            if !loser.is_alive() {
                return;
            }
            let die = if loser.status.is_grappled() {
                ctx.config.one_two_grappled_die
            } else {
                ctx.config.one_two_die
            };
            let amount = rng.roll_die(die);
            let dealt = loser.apply_damage(amount, DamageKind::Physical, true, ctx);
            ctx.push(CombatEvent::OneTwo {
                attacker: winner.name.clone(),
                dealt,
            });
        }
        Kit::Striker => {
            let cap = ctx.config.momentum_cap;
            if let KitState::Striker { momentum, .. } = &mut winner.status.kit {
                *momentum = momentum.saturating_add(1).min(cap);
                let stacks = *momentum;
                ctx.push(CombatEvent::MomentumGained {
                    name: winner.name.clone(),
                    stacks,
                });
            }
        }
        Kit::Grunt | Kit::ShutenMaru | Kit::Zect => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{CharacterTemplate, Side};
    use crate::rng::ScriptedRng;

    fn balter_and_goblin() -> (Combatant, Combatant) {
        (
            Combatant::from_template(Side::Player, &CharacterTemplate::balter()),
            Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt()),
        )
    }

    #[test]
    fn grapple_needs_a_strictly_higher_roll() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Grapple, ActionId::Guard);
        let (mut balter, mut goblin) = balter_and_goblin();

        let mut tie = ScriptedRng::new([ScriptedRng::face(5), ScriptedRng::face(5)]);
        assert!(!grapple(&mut balter, &mut goblin, &mut ctx, &mut tie));
        assert!(!goblin.status.is_grappled());

        let mut win = ScriptedRng::new([ScriptedRng::face(9), ScriptedRng::face(2)]);
        assert!(grapple(&mut balter, &mut goblin, &mut ctx, &mut win));
        assert_eq!(goblin.status.grappled_by, Some(Side::Player));
        assert_eq!(balter.status.grappling, Some(Side::Enemy));
        assert_eq!(goblin.speed, 1);
    }

    #[test]
    fn piledriver_ignores_defense_and_releases() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Piledriver, ActionId::Guard);
        let (mut balter, mut goblin) = balter_and_goblin();
        let mut rng = ScriptedRng::new([ScriptedRng::face(10), ScriptedRng::face(1)]);
        grapple(&mut balter, &mut goblin, &mut ctx, &mut rng);

        let dealt = piledriver(&mut balter, &mut goblin, &mut ctx);

        assert_eq!(dealt, 20);
        assert_eq!(goblin.hp(), 10);
        assert!(!goblin.status.is_grappled());
        assert!(balter.status.grappling.is_none());
        assert_eq!(goblin.speed, goblin.base_speed);
    }

    #[test]
    fn stale_piledriver_does_nothing() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Piledriver, ActionId::Guard);
        let (mut balter, mut goblin) = balter_and_goblin();

        assert_eq!(piledriver(&mut balter, &mut goblin, &mut ctx), 0);
        assert_eq!(goblin.hp(), goblin.max_hp());
        assert_eq!(ctx.events(), &[CombatEvent::PiledriverFailed]);
    }

    #[test]
    fn heavy_blow_staggers_on_damage() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::HeavyBlow, ActionId::Attack);
        let mut striker = Combatant::from_template(Side::Player, &CharacterTemplate::striker());
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        let dealt = heavy_blow(&mut striker, &mut goblin, &mut ctx, &mut rng);

        assert_eq!(dealt, 6);
        assert!(goblin.status.stagger_pending);
        assert!(!goblin.status.staggered);
    }

    #[test]
    fn skipper_applies_held_stats_immediately() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Skipper, ActionId::Attack);
        let mut striker = Combatant::from_template(Side::Player, &CharacterTemplate::striker());

        skipper(&mut striker, &mut ctx);

        assert!(striker.status.kit.skipper_active());
        assert_eq!(striker.defense, 2);
        assert_eq!(striker.coin_flips, 2);
        assert!(striker.forces_heads());
    }

    #[test]
    fn oversized_skipper_config_clamps_stats() {
        let config = CombatConfig {
            skipper_defense_penalty: u32::MAX,
            skipper_coin_bonus: u32::MAX,
            ..CombatConfig::default()
        };
        let mut ctx = RoundContext::new(&config, 1, ActionId::Skipper, ActionId::Attack);
        let mut striker = Combatant::from_template(Side::Player, &CharacterTemplate::striker());

        skipper(&mut striker, &mut ctx);

        assert_eq!(striker.status.held.defense, -i32::MAX);
        assert_eq!(striker.status.held.coin_flips, i32::MAX);
        assert_eq!(striker.defense, 0);
        assert_eq!(striker.coin_flips, 1 + i32::MAX as u32);
    }

    #[test]
    fn heavy_blow_die_saturates() {
        let config = CombatConfig {
            heavy_blow_die_bonus: 10,
            ..CombatConfig::default()
        };
        let mut ctx = RoundContext::new(&config, 1, ActionId::HeavyBlow, ActionId::Attack);
        let giant = CharacterTemplate::new("Giant", Kit::Striker, 90, u32::MAX, 4, 12, 1);
        let mut striker = Combatant::from_template(Side::Player, &giant);
        let mut goblin = Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt());
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        assert_eq!(heavy_blow(&mut striker, &mut goblin, &mut ctx, &mut rng), 6);
    }

    #[test]
    fn phase_caps_misty_stacks() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Phase, ActionId::Attack);
        let mut shuten = Combatant::from_template(Side::Player, &CharacterTemplate::shuten_maru());

        for _ in 0..5 {
            phase(&mut shuten, &mut ctx);
        }
        assert_eq!(
            shuten.status.kit,
            KitState::ShutenMaru {
                misty_stacks: 3,
                rewind_used: false
            }
        );
    }

    #[test]
    fn hammer_moves_base_defense_with_the_form() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::SwitchHammer, ActionId::Attack);
        let mut zect = Combatant::from_template(Side::Player, &CharacterTemplate::zect());

        switch_form(&mut zect, ZectForm::Hammer, &mut ctx);
        assert_eq!((zect.base_defense, zect.defense), (7, 7));

        switch_form(&mut zect, ZectForm::Scythe, &mut ctx);
        assert_eq!((zect.base_defense, zect.defense), (5, 5));
    }

    #[test]
    fn one_two_uses_the_bigger_die_on_grappled_losers() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 1, ActionId::Haymaker, ActionId::Attack);
        let (mut balter, mut goblin) = balter_and_goblin();
        goblin.status.grappled_by = Some(Side::Player);
        let mut rng = ScriptedRng::new([ScriptedRng::face(6)]);

        on_clash_win(&mut balter, &mut goblin, &mut ctx, &mut rng);

        assert_eq!(goblin.hp(), 24);
    }
}
