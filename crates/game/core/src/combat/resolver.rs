//! Round resolution: ordering, dispatch, and the deferred counter pass.

use arrayvec::ArrayVec;

use crate::action::{ActionClass, ActionId};
use crate::entity::{Combatant, Combatants, Side};
use crate::rng::RandomSource;
use crate::round::{CombatEvent, RoundContext};

use super::abilities;
use super::attack::resolve_attack;
use super::clash::resolve_clash;
use super::damage::DamageKind;

/// One queued action for the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnEntry {
    pub actor: Side,
    pub action: ActionId,
    pub target: Side,
}

impl TurnEntry {
    fn new(actor: Side, action: ActionId) -> Self {
        Self {
            actor,
            action,
            target: actor.opponent(),
        }
    }
}

/// Resolve both committed actions for the round held in `ctx`.
///
/// Two strikes go to the clash sub-resolver. Otherwise entries run in speed
/// order (ties favor the player), then armed counters fire.
pub fn resolve_round(combatants: &mut Combatants, ctx: &mut RoundContext<'_>, rng: &mut dyn RandomSource) {
    let player_action = ctx.action_of(Side::Player);
    let enemy_action = ctx.action_of(Side::Enemy);

    if player_action.is_strike() && enemy_action.is_strike() {
        resolve_clash(combatants, ctx, rng);
        return;
    }

    abilities::apply_priority(&mut combatants.player, player_action, ctx.config);
    abilities::apply_priority(&mut combatants.enemy, enemy_action, ctx.config);

    for entry in turn_order(combatants, player_action, enemy_action) {
        let (actor, target) = combatants.split_mut(entry.actor);
        if !actor.is_alive() || !target.is_alive() {
            continue;
        }
        if entry.action == ActionId::Staggered {
            ctx.push(CombatEvent::StaggeredSkip {
                name: actor.name.clone(),
            });
            continue;
        }

        execute(actor, target, entry.action, ctx, rng);
    }

    for side in [Side::Player, Side::Enemy] {
        let (actor, target) = combatants.split_mut(side);
        fire_counter(actor, target, ctx, rng);
    }
}

/// Speed order for the round. Equal speed puts the player first.
pub fn turn_order(
    combatants: &Combatants,
    player_action: ActionId,
    enemy_action: ActionId,
) -> ArrayVec<TurnEntry, 2> {
    let player = TurnEntry::new(Side::Player, player_action);
    let enemy = TurnEntry::new(Side::Enemy, enemy_action);

    let mut order = ArrayVec::new();
    if combatants.player.speed >= combatants.enemy.speed {
        order.push(player);
        order.push(enemy);
    } else {
        order.push(enemy);
        order.push(player);
    }
    order
}

fn execute(
    actor: &mut Combatant,
    target: &mut Combatant,
    action: ActionId,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) {
    match action.class() {
        ActionClass::Strike => {
            let die = actor.attack;
            resolve_attack(actor, target, die, action.damage_kind(), false, ctx, rng);
        }
        ActionClass::Guard => actor.begin_guard(ctx),
        ActionClass::Staggered => {}
        ActionClass::Ability => match action {
            ActionId::Grapple => {
                abilities::grapple(actor, target, ctx, rng);
            }
            ActionId::Piledriver => {
                abilities::piledriver(actor, target, ctx);
            }
            ActionId::HeavyBlow => {
                abilities::heavy_blow(actor, target, ctx, rng);
            }
            ActionId::Skipper => abilities::skipper(actor, ctx),
            ActionId::Phase => abilities::phase(actor, ctx),
            ActionId::Rewind => {
                abilities::rewind(actor, target, ctx, rng);
            }
            _ => {
                if let Some(form) = action.target_form() {
                    abilities::switch_form(actor, form, ctx);
                }
            }
        },
    }
}

/// Guard-counter: fires once the opponent's strike has resolved.
fn fire_counter(
    actor: &mut Combatant,
    target: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) {
    if !actor.status.counter_armed || !ctx.action_of(target.side).is_strike() {
        return;
    }
    if !actor.is_alive() || !target.is_alive() {
        return;
    }

    ctx.push(CombatEvent::CounterTriggered {
        name: actor.name.clone(),
    });
    let die = actor.attack;
    resolve_attack(actor, target, die, DamageKind::Physical, true, ctx, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::entity::{CharacterTemplate, Kit};
    use crate::rng::ScriptedRng;

    fn combatants(player: CharacterTemplate) -> Combatants {
        Combatants::new(
            Combatant::from_template(Side::Player, &player),
            Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt()),
        )
    }

    #[test]
    fn equal_speed_favors_the_player() {
        let twin = CharacterTemplate::new("Twin", Kit::Grunt, 30, 8, 2, 6, 1);
        let c = combatants(twin);
        let order = turn_order(&c, ActionId::Guard, ActionId::Attack);
        assert_eq!(order[0].actor, Side::Player);
        assert_eq!(order[1].target, Side::Player);
    }

    #[test]
    fn slower_player_acts_second() {
        let c = combatants(CharacterTemplate::new("Slug", Kit::Grunt, 30, 8, 2, 3, 1));
        let order = turn_order(&c, ActionId::Attack, ActionId::Guard);
        assert_eq!(order[0].actor, Side::Enemy);
    }

    #[test]
    fn dead_enemy_skips_its_queued_attack() {
        let config = CombatConfig::default();
        let mut c = combatants(CharacterTemplate::striker());
        c.enemy.apply_damage(
            27,
            DamageKind::Physical,
            true,
            &mut RoundContext::new(&config, 1, ActionId::Guard, ActionId::Guard),
        );
        let mut ctx = RoundContext::new(&config, 1, ActionId::HeavyBlow, ActionId::Guard);
        // heavy blow rolls 8: 8 - 2 defense kills the 3 HP goblin
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        resolve_round(&mut c, &mut ctx, &mut rng);

        assert!(!c.enemy.is_alive());
        assert!(!c.enemy.status.stagger_pending);
        assert_eq!(rng.draws(), 1);
        assert!(
            !ctx.events()
                .iter()
                .any(|e| matches!(e, CombatEvent::Guarded { .. }))
        );
    }

    #[test]
    fn iron_guard_counters_a_strike() {
        let config = CombatConfig::default();
        let mut c = combatants(CharacterTemplate::balter());
        let mut ctx = RoundContext::new(&config, 1, ActionId::IronGuard, ActionId::Attack);
        // the goblin is blocked outright; only the counter rolls
        let mut rng = ScriptedRng::new([ScriptedRng::face(10)]);

        resolve_round(&mut c, &mut ctx, &mut rng);

        assert_eq!(c.player.hp(), 120);
        assert_eq!(c.enemy.hp(), 22);
        assert_eq!(rng.draws(), 1);
        assert!(
            ctx.events()
                .iter()
                .any(|e| matches!(e, CombatEvent::CounterTriggered { .. }))
        );
    }

    #[test]
    fn balter_plain_guard_also_counters() {
        let config = CombatConfig::default();
        let mut c = combatants(CharacterTemplate::balter());
        let mut ctx = RoundContext::new(&config, 1, ActionId::Guard, ActionId::Attack);
        let mut rng = ScriptedRng::new([ScriptedRng::face(10)]);

        resolve_round(&mut c, &mut ctx, &mut rng);

        assert_eq!(c.player.hp(), 120);
        assert_eq!(c.enemy.hp(), 22);
        assert_eq!(rng.draws(), 1);
        assert!(
            ctx.events()
                .iter()
                .any(|e| matches!(e, CombatEvent::CounterTriggered { .. }))
        );
    }

    #[test]
    fn grunt_guard_does_not_counter() {
        let config = CombatConfig::default();
        let warden = CharacterTemplate::new("Warden", Kit::Grunt, 100, 6, 5, 10, 1);
        let mut c = combatants(warden);
        let mut ctx = RoundContext::new(&config, 1, ActionId::Guard, ActionId::Attack);
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        resolve_round(&mut c, &mut ctx, &mut rng);

        assert_eq!(c.enemy.hp(), c.enemy.max_hp());
        assert_eq!(rng.draws(), 0);
        assert!(
            !ctx.events()
                .iter()
                .any(|e| matches!(e, CombatEvent::CounterTriggered { .. }))
        );
    }

    #[test]
    fn phase_speed_counts_toward_ordering() {
        let config = CombatConfig::default();
        let slow = CharacterTemplate::new("Shade", Kit::ShutenMaru, 80, 8, 5, 4, 1);
        let mut c = combatants(slow);
        let mut ctx = RoundContext::new(&config, 1, ActionId::Phase, ActionId::Attack);
        let mut rng = ScriptedRng::new([ScriptedRng::face(8)]);

        resolve_round(&mut c, &mut ctx, &mut rng);

        // phased first, so the goblin's hit eats the fresh Misty stack: max(1, 8 - 2) - 5
        assert_eq!(c.player.hp(), 79);
        assert!(matches!(ctx.events()[0], CombatEvent::Phased { .. }));
    }

    #[test]
    fn staggered_entry_is_skipped_with_a_log_line() {
        let config = CombatConfig::default();
        let mut c = combatants(CharacterTemplate::striker());
        let mut ctx = RoundContext::new(&config, 1, ActionId::Jab, ActionId::Staggered);
        let mut rng = ScriptedRng::new([ScriptedRng::face(4)]);

        resolve_round(&mut c, &mut ctx, &mut rng);

        assert_eq!(c.enemy.hp(), 28);
        assert!(matches!(
            ctx.events().last(),
            Some(CombatEvent::StaggeredSkip { .. })
        ));
    }
}
