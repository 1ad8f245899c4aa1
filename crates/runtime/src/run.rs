//! Roguelite run progression.
//!
//! A [`Run`] carries one hero from floor to floor. Between stages the run
//! sits at the crossroads; [`Run::next_stage`] draws the next encounter
//! type uniformly and the matching method resolves it.
use std::fmt;

use clash_content::Roster;
use clash_core::{
    ActionId, CombatConfig, CombatOutcome, Combatant, RandomSource, RoundResult, RunProgress, Side,
};
use rand::rngs::StdRng;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::rng::RandSource;
use crate::service::{CombatService, SessionHandle};

/// Where the run currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    /// Between stages; waiting for [`Run::next_stage`].
    Crossroads,
    Combat { handle: SessionHandle },
    Shrine,
    Shop,
    GameOver,
}

impl Stage {
    pub const fn kind(&self) -> StageKind {
        match self {
            Stage::Crossroads => StageKind::Crossroads,
            Stage::Combat { .. } => StageKind::Combat,
            Stage::Shrine => StageKind::Shrine,
            Stage::Shop => StageKind::Shop,
            Stage::GameOver => StageKind::GameOver,
        }
    }
}

/// [`Stage`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StageKind {
    Crossroads,
    Combat,
    Shrine,
    Shop,
    GameOver,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Crossroads => "crossroads",
            StageKind::Combat => "combat",
            StageKind::Shrine => "shrine",
            StageKind::Shop => "shop",
            StageKind::GameOver => "game over",
        };
        write!(f, "{}", label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShrineChoice {
    /// Restore HP, capped at max.
    Pray,
    /// Take gold.
    Smash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShrineOutcome {
    Healed(u32),
    Gold(u32),
}

pub struct Run<R: RandomSource> {
    roster: Roster,
    service: CombatService,
    /// Player state between encounters. Stale while a combat is live.
    player: Combatant,
    progress: RunProgress,
    stage: Stage,
    rng: R,
}

impl Run<RandSource<StdRng>> {
    /// Start a run with the config's seed, or entropy when it has none.
    pub fn from_config(player_key: &str, roster: Roster, config: RuntimeConfig) -> Result<Self> {
        let rng = RandSource::from_seed_option(config.seed);
        Self::start(player_key, roster, config.combat, rng)
    }
}

impl<R: RandomSource> Run<R> {
    /// Start on floor 1 with no gold, at the crossroads.
    pub fn start(player_key: &str, roster: Roster, config: CombatConfig, rng: R) -> Result<Self> {
        let entry = roster
            .heroes()
            .find(|entry| entry.key.eq_ignore_ascii_case(player_key))
            .ok_or_else(|| RuntimeError::UnknownCharacter {
                key: player_key.to_string(),
                role: "hero",
            })?;
        if roster.enemies().next().is_none() {
            return Err(RuntimeError::NoEnemies);
        }

        let player = Combatant::from_template(Side::Player, &entry.template);
        info!(hero = %player.name, "run started");

        Ok(Self {
            roster,
            service: CombatService::new(config),
            player,
            progress: RunProgress::default(),
            stage: Stage::Crossroads,
            rng,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_over(&self) -> bool {
        self.stage == Stage::GameOver
    }

    /// Live player state, read from the active session during combat.
    pub fn player(&self) -> &Combatant {
        match self.active_handle().and_then(|handle| self.service.session(handle).ok()) {
            Some(session) => session.player(),
            None => &self.player,
        }
    }

    /// Live floor and gold, including a reward credited by the active session.
    pub fn progress(&self) -> RunProgress {
        match self.active_handle().and_then(|handle| self.service.session(handle).ok()) {
            Some(session) => session.progress(),
            None => self.progress,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn service(&self) -> &CombatService {
        &self.service
    }

    /// Leave the crossroads for a uniformly drawn combat, shrine or shop.
    pub fn next_stage(&mut self) -> Result<Stage> {
        self.expect_stage(StageKind::Crossroads, "choose the next stage")?;

        self.stage = match self.rng.pick(3) {
            0 => self.enter_combat()?,
            1 => Stage::Shrine,
            _ => Stage::Shop,
        };
        info!(
            floor = self.progress.floor,
            stage = %self.stage.kind(),
            "stage entered"
        );
        Ok(self.stage)
    }

    pub fn available_actions(&self) -> Result<Vec<ActionId>> {
        let handle = self.combat_handle("list actions")?;
        self.service.available_actions(handle)
    }

    /// Play one combat round. A defeat ends the run on the spot.
    pub fn submit_action(&mut self, action: ActionId, target: Option<Side>) -> Result<RoundResult> {
        let handle = self.combat_handle("submit an action")?;
        let result = self
            .service
            .submit_player_action(handle, action, target, &mut self.rng)?;

        if result.outcome == CombatOutcome::PlayerLost {
            let (player, progress) = self.service.end_encounter(handle)?;
            self.player = player;
            self.progress = progress;
            self.stage = Stage::GameOver;
            info!(
                floor = self.progress.floor,
                gold = self.progress.gold,
                "run over"
            );
        }
        Ok(result)
    }

    /// Close a won combat and descend one floor.
    pub fn leave_combat(&mut self) -> Result<RunProgress> {
        let handle = self.combat_handle("leave combat")?;
        let (player, mut progress) = self.service.end_encounter(handle)?;
        progress.floor = progress.floor.saturating_add(1);

        self.player = player;
        self.progress = progress;
        self.stage = Stage::Crossroads;
        Ok(progress)
    }

    pub fn choose_shrine(&mut self, choice: ShrineChoice) -> Result<ShrineOutcome> {
        self.expect_stage(StageKind::Shrine, "visit the shrine")?;

        let config = self.service.config();
        let outcome = match choice {
            ShrineChoice::Pray => ShrineOutcome::Healed(self.player.heal(config.shrine_heal)),
            ShrineChoice::Smash => {
                self.progress.gold = self.progress.gold.saturating_add(config.shrine_gold);
                ShrineOutcome::Gold(config.shrine_gold)
            }
        };
        info!(?choice, ?outcome, "shrine resolved");

        self.stage = Stage::Crossroads;
        Ok(outcome)
    }

    /// The shop has nothing for sale yet; leaving is the only option.
    pub fn leave_shop(&mut self) -> Result<()> {
        self.expect_stage(StageKind::Shop, "leave the shop")?;
        self.stage = Stage::Crossroads;
        Ok(())
    }

    fn enter_combat(&mut self) -> Result<Stage> {
        let enemies: Vec<_> = self.roster.enemies().collect();
        if enemies.is_empty() {
            return Err(RuntimeError::NoEnemies);
        }
        let enemy = &enemies[self.rng.pick(enemies.len())].template;

        let handle = self
            .service
            .resume_encounter(self.player.clone(), enemy, self.progress);
        Ok(Stage::Combat { handle })
    }

    fn active_handle(&self) -> Option<SessionHandle> {
        match self.stage {
            Stage::Combat { handle } => Some(handle),
            _ => None,
        }
    }

    fn combat_handle(&self, operation: &'static str) -> Result<SessionHandle> {
        self.active_handle().ok_or(RuntimeError::WrongStage {
            operation,
            actual: self.stage.kind(),
        })
    }

    fn expect_stage(&self, expected: StageKind, operation: &'static str) -> Result<()> {
        if self.stage.kind() != expected {
            return Err(RuntimeError::WrongStage {
                operation,
                actual: self.stage.kind(),
            });
        }
        Ok(())
    }
}
