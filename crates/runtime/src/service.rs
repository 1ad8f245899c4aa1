//! Session registry for concurrent combat encounters.
//!
//! [`CombatService`] is the façade a presentation layer talks to: it starts
//! encounters, routes submitted actions to the right [`CombatSession`] and
//! hands back [`RoundResult`]s. Sessions never share state; each one is
//! addressed only through its [`SessionHandle`].
use std::collections::HashMap;
use std::fmt;

use clash_core::{
    ActionId, CharacterTemplate, CombatConfig, CombatError, CombatOutcome, CombatSession,
    Combatant, CombatantSnapshot, IllegalStateKind, RandomSource, RoundResult, RunProgress, Side,
};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};

/// Opaque identifier for a registered combat session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Read-only view of a session between rounds.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub round: u32,
    pub player: CombatantSnapshot,
    pub enemy: CombatantSnapshot,
    pub outcome: CombatOutcome,
    pub progress: RunProgress,
}

#[derive(Debug)]
pub struct CombatService {
    config: CombatConfig,
    sessions: HashMap<SessionHandle, CombatSession>,
    next_handle: u64,
}

impl Default for CombatService {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatService {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            next_handle: 1,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Start a fresh encounter between two templates.
    pub fn start_encounter(
        &mut self,
        player: &CharacterTemplate,
        enemy: &CharacterTemplate,
    ) -> SessionHandle {
        let session = CombatSession::start(player, enemy, self.config.clone());
        self.register(session)
    }

    /// Start an encounter with a player carried over from an earlier one.
    pub fn resume_encounter(
        &mut self,
        player: Combatant,
        enemy: &CharacterTemplate,
        progress: RunProgress,
    ) -> SessionHandle {
        let session = CombatSession::resume(player, enemy, progress, self.config.clone());
        self.register(session)
    }

    pub fn submit_player_action(
        &mut self,
        handle: SessionHandle,
        action: ActionId,
        target: Option<Side>,
        rng: &mut dyn RandomSource,
    ) -> Result<RoundResult> {
        let session = self
            .sessions
            .get_mut(&handle)
            .ok_or(RuntimeError::UnknownSession(handle))?;

        let result = session
            .submit_player_action(action, target, rng)
            .inspect_err(|err| warn!(%handle, %action, error = %err, "action rejected"))?;

        debug!(
            %handle,
            round = result.round,
            %action,
            events = result.events.len(),
            player_hp = result.player.hp,
            enemy_hp = result.enemy.hp,
            "round resolved"
        );
        if result.is_finished() {
            info!(
                %handle,
                round = result.round,
                outcome = %result.outcome,
                reward = ?result.reward,
                "encounter decided"
            );
        }

        Ok(result)
    }

    pub fn available_actions(&self, handle: SessionHandle) -> Result<Vec<ActionId>> {
        Ok(self.session(handle)?.available_actions())
    }

    pub fn snapshot(&self, handle: SessionHandle) -> Result<SessionSnapshot> {
        let session = self.session(handle)?;
        Ok(SessionSnapshot {
            round: session.round(),
            player: session.player().snapshot(),
            enemy: session.enemy().snapshot(),
            outcome: session.outcome(),
            progress: session.progress(),
        })
    }

    pub fn session(&self, handle: SessionHandle) -> Result<&CombatSession> {
        self.sessions
            .get(&handle)
            .ok_or(RuntimeError::UnknownSession(handle))
    }

    /// Unregister a decided session and hand back the player and run counters.
    ///
    /// An undecided session stays registered and the call fails.
    pub fn end_encounter(&mut self, handle: SessionHandle) -> Result<(Combatant, RunProgress)> {
        if !self.session(handle)?.is_finished() {
            return Err(CombatError::IllegalState(IllegalStateKind::SessionOngoing).into());
        }
        let session = self
            .sessions
            .remove(&handle)
            .ok_or(RuntimeError::UnknownSession(handle))?;

        info!(%handle, outcome = %session.outcome(), "session closed");
        Ok(session.finish()?)
    }

    /// Drop a session regardless of its state.
    pub fn abandon(&mut self, handle: SessionHandle) -> Result<()> {
        self.sessions
            .remove(&handle)
            .map(|session| debug!(%handle, round = session.round(), "session abandoned"))
            .ok_or(RuntimeError::UnknownSession(handle))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn register(&mut self, session: CombatSession) -> SessionHandle {
        let handle = SessionHandle(self.next_handle);
        self.next_handle += 1;

        info!(
            %handle,
            player = %session.player().name,
            enemy = %session.enemy().name,
            "encounter started"
        );
        self.sessions.insert(handle, session);
        handle
    }
}
