//! Clash sub-resolver: both sides struck in the same round.
//!
//! A clash replaces speed ordering with a coin-flip contest:
//!
//! 1. A grappled side forfeits; the other gets a free, unblockable attack.
//! 2. Each side flips `coin_flips` coins (doubled by the Homogenous trait).
//! 3. More heads wins. Equal heads is a draw: both take one uncontested roll.
//! 4. The winner deals `roll(attack) + heads * bonus_per_head (+ one-shot bonus)`
//!    and may trigger clash-win traits.

use crate::entity::{Combatant, Combatants, KitHooks, Side};
use crate::rng::RandomSource;
use crate::round::{CombatEvent, RoundContext};

use super::abilities;
use super::attack::resolve_attack;
use super::damage::DamageKind;

/// How a clash ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClashOutcome {
    /// The grappled side forfeited; `winner` took a free attack.
    Forfeit { winner: Side, dealt: u32 },
    Draw { heads: u32 },
    Won {
        winner: Side,
        winner_heads: u32,
        loser_heads: u32,
        dealt: u32,
    },
}

/// Resolve a clash between the player and the enemy. The player flips first.
pub fn resolve_clash(
    combatants: &mut Combatants,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> ClashOutcome {
    let Combatants { player, enemy } = combatants;
    resolve_clash_between(player, enemy, ctx, rng)
}

/// Resolve a clash with an explicit flip order.
pub fn resolve_clash_between(
    first: &mut Combatant,
    second: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> ClashOutcome {
    if first.status.is_grappled() || second.status.is_grappled() {
        let (winner, loser) = if first.status.is_grappled() {
            (second, first)
        } else {
            (first, second)
        };
        return forfeit(winner, loser, ctx, rng);
    }

    ctx.push(CombatEvent::ClashBegins);
    let first_heads = flip(first, ctx, rng);
    let second_heads = flip(second, ctx, rng);

    if first_heads == second_heads {
        ctx.push(CombatEvent::ClashDraw { heads: first_heads });
        draw_hit(second, first, ctx, rng);
        draw_hit(first, second, ctx, rng);
        return ClashOutcome::Draw { heads: first_heads };
    }

    let (winner, loser, winner_heads, loser_heads) = if first_heads > second_heads {
        (first, second, first_heads, second_heads)
    } else {
        (second, first, second_heads, first_heads)
    };

    let mut bonus = winner_heads.saturating_mul(ctx.config.clash_bonus_per_head);
    if winner.kit.hooks().contains(KitHooks::CLASH_COINS) {
        bonus = bonus.saturating_mul(winner.clash_multiplier());
        ctx.push(CombatEvent::HomogenousBonus {
            name: winner.name.clone(),
        });
    }
    bonus = bonus.saturating_add(core::mem::take(&mut winner.status.clash_bonus));

    ctx.push(CombatEvent::ClashWon {
        winner: winner.name.clone(),
        winner_heads,
        loser_heads,
    });

    let roll = winner.roll_damage(winner.attack, DamageKind::Physical, ctx, rng);
    let dealt = loser.apply_damage(roll.total().saturating_add(bonus), DamageKind::Physical, false, ctx);
    ctx.push(CombatEvent::ClashHit {
        attacker: winner.name.clone(),
        defender: loser.name.clone(),
        base: roll.total(),
        bonus,
        dealt,
    });

    if winner.kit.hooks().contains(KitHooks::CLASH_WIN) {
        abilities::on_clash_win(winner, loser, ctx, rng);
    }

    ClashOutcome::Won {
        winner: winner.side,
        winner_heads,
        loser_heads,
        dealt,
    }
}

fn forfeit(
    winner: &mut Combatant,
    loser: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) -> ClashOutcome {
    ctx.push(CombatEvent::ClashNullified {
        grappled: loser.name.clone(),
    });
    ctx.push(CombatEvent::FreeAttack {
        attacker: winner.name.clone(),
    });

    let die = winner.attack;
    let outcome = resolve_attack(winner, loser, die, DamageKind::Physical, true, ctx, rng);
    ClashOutcome::Forfeit {
        winner: winner.side,
        dealt: outcome.dealt(),
    }
}

/// Flip a side's clash coins and return the number of heads.
fn flip(combatant: &Combatant, ctx: &mut RoundContext<'_>, rng: &mut dyn RandomSource) -> u32 {
    let coins = combatant.coin_flips.saturating_mul(combatant.clash_multiplier());
    let forced = combatant.forces_heads();
    let heads = if forced {
        coins
    } else {
        (0..coins).filter(|_| rng.flip_coin()).count() as u32
    };

    ctx.push(CombatEvent::CoinsFlipped {
        name: combatant.name.clone(),
        coins,
        heads,
        forced,
    });
    heads
}

fn draw_hit(
    attacker: &Combatant,
    defender: &mut Combatant,
    ctx: &mut RoundContext<'_>,
    rng: &mut dyn RandomSource,
) {
    let roll = attacker.roll_damage(attacker.attack, DamageKind::Physical, ctx, rng);
    let dealt = defender.apply_damage(roll.total(), DamageKind::Physical, false, ctx);
    ctx.push(CombatEvent::DrawDamage {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        dealt,
    });
}
