//! Combat session: one player, one enemy, one encounter.
//!
//! [`CombatSession`] is the unit of isolation. It owns both combatants and
//! the run counters, validates each submission before anything is rolled,
//! resolves the round through a fresh [`RoundContext`], and reports a
//! [`RoundResult`].
//!
//! # Round protocol
//!
//! 1. Reject calls on a finished session (`IllegalState`)
//! 2. Validate the player's action; a staggered player is forced to skip
//! 3. Pick the enemy's action (policy, or forced skip)
//! 4. Resolve, then check termination (player first)
//! 5. Ongoing: reset both sides and run round-start hooks.
//!    Finished: credit the reward once and clear encounter state.

use crate::action::{ActionId, available_actions, validate_action};
use crate::combat::{self, CombatOutcome};
use crate::config::CombatConfig;
use crate::entity::{CharacterTemplate, Combatant, CombatantSnapshot, Combatants, Side};
use crate::error::{CombatError, CombatResult, IllegalStateKind, InvalidActionReason};
use crate::policy::{EnemyPolicy, WeightedPolicy};
use crate::rng::RandomSource;
use crate::round::{CombatEvent, RoundContext};

/// Meta-progression counters carried through a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunProgress {
    pub floor: u32,
    pub gold: u32,
}

impl Default for RunProgress {
    fn default() -> Self {
        Self { floor: 1, gold: 0 }
    }
}

/// Everything the presentation layer needs after one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    pub round: u32,
    pub events: Vec<CombatEvent>,
    pub player: CombatantSnapshot,
    pub enemy: CombatantSnapshot,
    pub outcome: CombatOutcome,
    /// Gold credited this round, set only on the winning round.
    pub reward: Option<u32>,
}

impl RoundResult {
    /// One narrated line per event, in resolution order.
    pub fn log_lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }
}

/// One combat encounter.
#[derive(Clone, Debug)]
pub struct CombatSession {
    config: CombatConfig,
    combatants: Combatants,
    progress: RunProgress,
    round: u32,
    outcome: CombatOutcome,
}

impl CombatSession {
    /// Start a fresh encounter from two templates.
    pub fn start(player: &CharacterTemplate, enemy: &CharacterTemplate, config: CombatConfig) -> Self {
        let player = Combatant::from_template(Side::Player, player);
        Self::resume(player, enemy, RunProgress::default(), config)
    }

    /// Start an encounter with a player carried over from earlier fights.
    ///
    /// HP and Zect's form persist; every encounter-scoped status is cleared.
    pub fn resume(
        mut player: Combatant,
        enemy: &CharacterTemplate,
        progress: RunProgress,
        config: CombatConfig,
    ) -> Self {
        player.side = Side::Player;
        player.clear_encounter_state(&config);
        let enemy = Combatant::from_template(Side::Enemy, enemy);

        let mut combatants = Combatants::new(player, enemy);
        combat::begin_round(&mut combatants, &config);

        Self {
            config,
            combatants,
            progress,
            round: 0,
            outcome: CombatOutcome::Ongoing,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn player(&self) -> &Combatant {
        &self.combatants.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.combatants.enemy
    }

    pub fn combatants(&self) -> &Combatants {
        &self.combatants
    }

    pub fn progress(&self) -> RunProgress {
        self.progress
    }

    /// Rounds resolved so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> CombatOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    /// Actions the player may submit next. Empty once the session is over.
    pub fn available_actions(&self) -> Vec<ActionId> {
        if self.is_finished() {
            return Vec::new();
        }
        available_actions(&self.combatants.player, &self.combatants.enemy)
    }

    /// Submit the player's action; the enemy acts per the weighted policy.
    pub fn submit_player_action(
        &mut self,
        action: ActionId,
        target: Option<Side>,
        rng: &mut dyn RandomSource,
    ) -> CombatResult<RoundResult> {
        let policy = WeightedPolicy::new(self.config.enemy_attack_chance);
        self.submit_with_policy(action, target, &policy, rng)
    }

    /// Submit the player's action with a caller-supplied enemy policy.
    pub fn submit_with_policy(
        &mut self,
        action: ActionId,
        target: Option<Side>,
        policy: &dyn EnemyPolicy,
        rng: &mut dyn RandomSource,
    ) -> CombatResult<RoundResult> {
        self.ensure_ongoing()?;
        let player_action = self.check_player_action(action, target)?;

        let enemy_action = if self.combatants.enemy.status.staggered {
            ActionId::Staggered
        } else {
            let chosen = policy.choose(&self.combatants.enemy, &self.combatants.player, rng);
            validate_action(&self.combatants.enemy, &self.combatants.player, chosen)?;
            chosen
        };

        Ok(self.run_round(player_action, enemy_action, rng))
    }

    /// Resolve a round with both actions given. Both are validated first.
    pub fn resolve_round(
        &mut self,
        player_action: ActionId,
        enemy_action: ActionId,
        rng: &mut dyn RandomSource,
    ) -> CombatResult<RoundResult> {
        self.ensure_ongoing()?;
        let player_action = self.check_player_action(player_action, None)?;

        let enemy_action = if self.combatants.enemy.status.staggered {
            ActionId::Staggered
        } else {
            validate_action(&self.combatants.enemy, &self.combatants.player, enemy_action)?;
            enemy_action
        };

        Ok(self.run_round(player_action, enemy_action, rng))
    }

    /// Hand back the player and run counters once the encounter is decided.
    pub fn finish(self) -> CombatResult<(Combatant, RunProgress)> {
        if !self.is_finished() {
            return Err(CombatError::IllegalState(IllegalStateKind::SessionOngoing));
        }
        Ok((self.combatants.player, self.progress))
    }

    fn ensure_ongoing(&self) -> CombatResult<()> {
        if self.is_finished() {
            return Err(CombatError::IllegalState(IllegalStateKind::SessionFinished {
                outcome: self.outcome,
            }));
        }
        Ok(())
    }

    fn check_player_action(&self, action: ActionId, target: Option<Side>) -> CombatResult<ActionId> {
        if let Some(side) = target.filter(|side| *side != Side::Enemy) {
            return Err(CombatError::invalid(
                action,
                InvalidActionReason::WrongTarget(side),
            ));
        }
        if self.combatants.player.status.staggered {
            return Ok(ActionId::Staggered);
        }

        validate_action(&self.combatants.player, &self.combatants.enemy, action)?;
        Ok(action)
    }

    fn run_round(
        &mut self,
        player_action: ActionId,
        enemy_action: ActionId,
        rng: &mut dyn RandomSource,
    ) -> RoundResult {
        self.round += 1;
        let mut ctx = RoundContext::new(&self.config, self.round, player_action, enemy_action);

        combat::resolve_round(&mut self.combatants, &mut ctx, rng);
        let outcome = combat::check_outcome(&self.combatants, &mut ctx);

        let mut reward = None;
        match outcome {
            CombatOutcome::Ongoing => {
                combat::end_round(&mut self.combatants, &mut ctx);
                combat::begin_round(&mut self.combatants, &self.config);
            }
            CombatOutcome::PlayerWon => {
                let gold = self.config.victory_reward;
                self.progress.gold = self.progress.gold.saturating_add(gold);
                reward = Some(gold);
                combat::conclude_encounter(&mut self.combatants, &self.config);
            }
            CombatOutcome::PlayerLost => {
                combat::conclude_encounter(&mut self.combatants, &self.config);
            }
        }
        self.outcome = outcome;

        RoundResult {
            round: self.round,
            events: ctx.into_events(),
            player: self.combatants.player.snapshot(),
            enemy: self.combatants.enemy.snapshot(),
            outcome,
            reward,
        }
    }
}
