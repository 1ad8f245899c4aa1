//! Which actions a combatant may commit to right now.
//!
//! [`available_actions`] is what the presentation layer offers;
//! [`validate_action`] is the same rule set applied to a submission. Both are
//! derived from the combatant's kit and current status, so an action is
//! offered exactly when it would validate.

use crate::entity::Combatant;
use crate::error::{CombatError, CombatResult, InvalidActionReason};

use super::ActionId;

/// Get every action `actor` may pick this round, in kit menu order.
///
/// A staggered combatant has exactly one option: [`ActionId::Staggered`].
pub fn available_actions(actor: &Combatant, opponent: &Combatant) -> Vec<ActionId> {
    if actor.status.staggered {
        return vec![ActionId::Staggered];
    }

    actor
        .kit
        .actions()
        .iter()
        .copied()
        .filter(|&action| check_requirements(actor, opponent, action).is_ok())
        .collect()
}

/// Check that `action` is currently legal for `actor`.
///
/// Called before anything is rolled or mutated, so a rejection leaves the
/// session exactly as it was.
pub fn validate_action(actor: &Combatant, opponent: &Combatant, action: ActionId) -> CombatResult<()> {
    if actor.status.staggered && action == ActionId::Staggered {
        return Ok(());
    }
    if !actor.kit.has_action(action) {
        return Err(CombatError::invalid(action, InvalidActionReason::NotInKit));
    }

    check_requirements(actor, opponent, action)
        .map_err(|reason| CombatError::invalid(action, reason))
}

fn check_requirements(
    actor: &Combatant,
    opponent: &Combatant,
    action: ActionId,
) -> Result<(), InvalidActionReason> {
    match action {
        ActionId::Piledriver if opponent.status.grappled_by != Some(actor.side) => {
            Err(InvalidActionReason::TargetNotGrappled)
        }
        ActionId::Grapple if opponent.status.is_grappled() => {
            Err(InvalidActionReason::TargetAlreadyGrappled)
        }
        ActionId::Skipper if actor.status.kit.skipper_active() => Err(InvalidActionReason::BuffActive),
        ActionId::Rewind if actor.status.kit.rewind_used() => Err(InvalidActionReason::RewindSpent),
        ActionId::SwitchScythe | ActionId::SwitchTrident | ActionId::SwitchHammer
            if action.target_form() == actor.status.kit.form() =>
        {
            Err(InvalidActionReason::AlreadyInForm)
        }
        _ => Ok(()),
    }
}
