//! Per-round context.
//!
//! A [`RoundContext`] is created fresh for every round, threaded by `&mut`
//! through every resolution call, and consumed at the end to yield the
//! round's events. Nothing in it outlives the round.

pub mod event;

pub use event::CombatEvent;

use crate::action::ActionId;
use crate::config::CombatConfig;
use crate::entity::Side;

/// Ephemeral state for one round of resolution.
#[derive(Debug)]
pub struct RoundContext<'a> {
    pub config: &'a CombatConfig,
    pub round: u32,

    player_action: ActionId,
    enemy_action: ActionId,

    /// Side whose natural rolls double this round.
    pub rewind: Option<Side>,

    events: Vec<CombatEvent>,
}

impl<'a> RoundContext<'a> {
    pub fn new(
        config: &'a CombatConfig,
        round: u32,
        player_action: ActionId,
        enemy_action: ActionId,
    ) -> Self {
        Self {
            config,
            round,
            player_action,
            enemy_action,
            rewind: None,
            events: Vec::new(),
        }
    }

    /// Action `side` committed to this round.
    pub fn action_of(&self, side: Side) -> ActionId {
        match side {
            Side::Player => self.player_action,
            Side::Enemy => self.enemy_action,
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CombatEvent> {
        self.events
    }
}
