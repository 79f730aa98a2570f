//! Real-time fan-out of game events to connected sessions.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

use crate::domain::machine::GameMachine;
use crate::domain::state::{GameStatus, PlayerId, Seat};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// One applied move (or lobby change). A mutation that runs bot turns
    /// emits one event per step, all carrying the saved version.
    StateChanged {
        game_id: Uuid,
        version: u64,
        status: GameStatus,
        current_player_index: Seat,
        turn_epoch: u64,
        to_act: Vec<PlayerId>,
    },
    /// `player_id` may move and could not before the mutation.
    YourTurn {
        game_id: Uuid,
        player_id: PlayerId,
        version: u64,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> Uuid {
        match self {
            GameEvent::StateChanged { game_id, .. } | GameEvent::YourTurn { game_id, .. } => {
                *game_id
            }
        }
    }
}

/// Turn-relevant slice of the machine captured after each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub status: GameStatus,
    pub current_player_index: Seat,
    pub turn_epoch: u64,
    pub to_act: Vec<PlayerId>,
}

impl TurnSnapshot {
    pub fn of(machine: &GameMachine) -> Self {
        let state = machine.state();
        Self {
            status: state.status,
            current_player_index: state.current_player_index,
            turn_epoch: state.turn_epoch,
            to_act: machine
                .seats_to_act()
                .into_iter()
                .filter_map(|seat| state.players.get(seat).map(|p| p.id.clone()))
                .collect(),
        }
    }

    pub fn into_event(self, game_id: Uuid, version: u64) -> GameEvent {
        GameEvent::StateChanged {
            game_id,
            version,
            status: self.status,
            current_player_index: self.current_player_index,
            turn_epoch: self.turn_epoch,
            to_act: self.to_act,
        }
    }
}

pub trait Broadcaster: Send + Sync {
    fn publish(&self, event: GameEvent);
}

/// Per-game tokio broadcast channels.
#[derive(Default)]
pub struct ChannelBroadcaster {
    channels: DashMap<Uuid, broadcast::Sender<GameEvent>>,
}

impl ChannelBroadcaster {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    pub fn subscribe(&self, game_id: Uuid) -> broadcast::Receiver<GameEvent> {
        self.channels
            .entry(game_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub fn subscriber_count(&self, game_id: Uuid) -> usize {
        self.channels
            .get(&game_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn publish(&self, event: GameEvent) {
        let game_id = event.game_id();
        let Some(tx) = self.channels.get(&game_id) else {
            return;
        };
        if tx.send(event).is_err() {
            trace!(%game_id, "No listeners left, dropping channel");
            drop(tx);
            self.channels
                .remove_if(&game_id, |_, tx| tx.receiver_count() == 0);
        }
    }
}
