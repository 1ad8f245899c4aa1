//! Enemy action selection.

use crate::action::ActionId;
use crate::entity::Combatant;
use crate::rng::RandomSource;

/// Chooses the enemy's action for a round.
pub trait EnemyPolicy {
    fn choose(&self, enemy: &Combatant, player: &Combatant, rng: &mut dyn RandomSource) -> ActionId;
}

/// Strike with a fixed percent chance, guard otherwise. Draws one d100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightedPolicy {
    pub attack_chance: u32,
}

impl WeightedPolicy {
    pub const fn new(attack_chance: u32) -> Self {
        Self { attack_chance }
    }
}

impl EnemyPolicy for WeightedPolicy {
    fn choose(&self, enemy: &Combatant, _player: &Combatant, rng: &mut dyn RandomSource) -> ActionId {
        if rng.roll_d100() <= self.attack_chance {
            enemy.kit.strike()
        } else {
            ActionId::Guard
        }
    }
}

/// Always picks the same action. Useful for scripted encounters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPolicy(pub ActionId);

impl EnemyPolicy for FixedPolicy {
    fn choose(&self, _enemy: &Combatant, _player: &Combatant, _rng: &mut dyn RandomSource) -> ActionId {
        self.0
    }
}
