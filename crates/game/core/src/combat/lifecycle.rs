//! Round lifecycle: termination checks, end-of-round reset, encounter teardown.

use crate::config::CombatConfig;
use crate::entity::{Combatants, Side};
use crate::round::{CombatEvent, RoundContext};

use super::abilities::release_grapple;

/// Terminal flag of a combat session.
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
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CombatOutcome {
    #[default]
    Ongoing,
    PlayerWon,
    PlayerLost,
}

impl CombatOutcome {
    pub const fn is_finished(self) -> bool {
        !matches!(self, CombatOutcome::Ongoing)
    }
}

/// Check for deaths after resolution. The player is checked first, so a
/// round that kills both sides is a loss.
pub fn check_outcome(combatants: &Combatants, ctx: &mut RoundContext<'_>) -> CombatOutcome {
    for side in [Side::Player, Side::Enemy] {
        let combatant = combatants.get(side);
        if !combatant.is_alive() {
            ctx.push(CombatEvent::Defeated {
                name: combatant.name.clone(),
            });
        }
    }

    if !combatants.player.is_alive() {
        CombatOutcome::PlayerLost
    } else if !combatants.enemy.is_alive() {
        CombatOutcome::PlayerWon
    } else {
        CombatOutcome::Ongoing
    }
}

/// Reset both combatants after a round that did not end the encounter.
pub fn end_round(combatants: &mut Combatants, ctx: &mut RoundContext<'_>) {
    combatants.player.end_of_round_reset(ctx);
    combatants.enemy.end_of_round_reset(ctx);
}

/// Round-start hooks for the coming round.
pub fn begin_round(combatants: &mut Combatants, config: &CombatConfig) {
    combatants.player.begin_round(config);
    combatants.enemy.begin_round(config);
}

/// Tear down encounter-scoped state once the session is decided.
pub fn conclude_encounter(combatants: &mut Combatants, config: &CombatConfig) {
    for side in [Side::Player, Side::Enemy] {
        let (grappler, target) = combatants.split_mut(side);
        if grappler.status.grappling.is_some() {
            release_grapple(grappler, target);
        }
    }
    combatants.player.clear_encounter_state(config);
    combatants.enemy.clear_encounter_state(config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;
    use crate::combat::DamageKind;
    use crate::entity::{CharacterTemplate, Combatant};

    fn pair() -> Combatants {
        Combatants::new(
            Combatant::from_template(Side::Player, &CharacterTemplate::balter()),
            Combatant::from_template(Side::Enemy, &CharacterTemplate::goblin_grunt()),
        )
    }

    #[test]
    fn mutual_knockout_is_a_loss() {
        let config = CombatConfig::default();
        let mut ctx = RoundContext::new(&config, 3, ActionId::Haymaker, ActionId::Attack);
        let mut c = pair();
        c.player.apply_damage(500, DamageKind::Physical, true, &mut ctx);
        c.enemy.apply_damage(500, DamageKind::Physical, true, &mut ctx);

        assert_eq!(check_outcome(&c, &mut ctx), CombatOutcome::PlayerLost);
        let defeated = ctx
            .events()
            .iter()
            .filter(|e| matches!(e, CombatEvent::Defeated { .. }))
            .count();
        assert_eq!(defeated, 2);
    }

    #[test]
    fn outcome_renders_like_the_terminal_flag() {
        assert_eq!(CombatOutcome::PlayerWon.to_string(), "PLAYER_WON");
        assert!(!CombatOutcome::Ongoing.is_finished());
    }

    #[test]
    fn conclusion_releases_the_grapple() {
        let config = CombatConfig::default();
        let mut c = pair();
        c.enemy.status.grappled_by = Some(Side::Player);
        c.player.status.grappling = Some(Side::Enemy);
        c.enemy.speed = 1;

        conclude_encounter(&mut c, &config);

        assert!(!c.enemy.status.is_grappled());
        assert!(c.player.status.grappling.is_none());
        assert_eq!(c.enemy.speed, c.enemy.base_speed);
    }
}
