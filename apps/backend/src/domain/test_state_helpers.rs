//! Test-only machine helpers for domain unit tests.

use crate::domain::machine::GameMachine;
use crate::domain::moves::{Move, MoveAction};
use crate::domain::player_view::PlayerView;
use crate::domain::settings::GameSettings;
use crate::domain::state::{GameStatus, GameType, PlayerId, PlayerSeat};

/// Player ids `p0..pN`.
pub fn player_ids(count: usize) -> Vec<PlayerId> {
    (0..count).map(|i| PlayerId::new(format!("p{i}"))).collect()
}

/// A lobby with `count` human seats, not yet started.
pub fn lobby(game_type: GameType, count: usize, settings: &GameSettings) -> GameMachine {
    let mut machine = GameMachine::new(game_type, settings);
    for id in player_ids(count) {
        let name = id.as_str().to_uppercase();
        machine
            .add_player(PlayerSeat::human(id, name))
            .expect("lobby seat");
    }
    machine
}

/// A started game with `count` seats and a fixed seed.
pub fn started(game_type: GameType, count: usize, seed: u64) -> GameMachine {
    let mut machine = lobby(game_type, count, &GameSettings::with_seed(seed));
    machine.start_game().expect("start");
    machine
}

/// Submit `action` for the player at `seat`, panicking on rejection.
pub fn play(machine: &mut GameMachine, seat: usize, action: MoveAction) {
    let player = machine.state().players[seat].id.clone();
    let mv = Move::at(player, action, 0);
    machine
        .process_move(&mv)
        .unwrap_or_else(|e| panic!("seat {seat} move {mv:?} rejected: {e}"));
}

/// Drive a game with legal moves picked by `picks`. Each pick selects the
/// acting seat and then the action, both modulo the available options.
/// Stops early when the game finishes. Returns the number of moves applied.
pub fn drive(machine: &mut GameMachine, picks: &[(usize, usize)]) -> usize {
    let mut applied = 0;
    for &(seat_pick, action_pick) in picks {
        if machine.status() != GameStatus::Playing {
            break;
        }
        let actors = machine.seats_to_act();
        let seat = actors[seat_pick % actors.len()];
        let legal = machine.legal_actions(seat);
        let action = legal[action_pick % legal.len()].clone();
        play(machine, seat, action);
        applied += 1;
    }
    applied
}

/// The view of `seat` in a freshly started game.
pub fn started_view(game_type: GameType, count: usize, seed: u64, seat: usize) -> PlayerView {
    PlayerView::for_seat(&started(game_type, count, seed), seat).expect("view")
}
