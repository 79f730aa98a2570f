use crate::domain::machine::GameMachine;
use crate::domain::state::{GameStatus, PlayerId};

/// The slice of a game that lifecycle events are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub status: GameStatus,
    pub player_count: usize,
    /// Players who may move, in seat order.
    pub to_act: Vec<PlayerId>,
}

impl GameLifecycleView {
    pub fn of(machine: &GameMachine) -> Self {
        let state = machine.state();
        Self {
            status: state.status,
            player_count: state.players.len(),
            to_act: machine
                .seats_to_act()
                .into_iter()
                .filter_map(|seat| state.players.get(seat).map(|p| p.id.clone()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: this player may now move and could not before.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: waiting -> playing
    GameStarted,

    /// Edge-triggered: !finished -> finished
    GameEnded,

    /// Edge-triggered: a seat was filled in the lobby
    PlayerJoined,
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Seats filled
    if after.player_count > before.player_count {
        transitions.push(GameTransition::PlayerJoined);
    }

    // 2. Game start
    if before.status == GameStatus::Waiting && after.status == GameStatus::Playing {
        transitions.push(GameTransition::GameStarted);
    }

    // 3. Turn changes; simultaneous phases can hand the turn to several players at once
    for player_id in &after.to_act {
        if !before.to_act.contains(player_id) {
            transitions.push(GameTransition::TurnBecame {
                player_id: player_id.clone(),
            });
        }
    }

    // 4. Game end
    if before.status != GameStatus::Finished && after.status == GameStatus::Finished {
        transitions.push(GameTransition::GameEnded);
    }

    transitions
}
