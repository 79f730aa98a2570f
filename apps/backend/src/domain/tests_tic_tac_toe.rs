use crate::domain::machine::GameMachine;
use crate::domain::moves::{Move, MoveAction};
use crate::domain::state::{GameData, GameStatus, GameType};
use crate::domain::test_state_helpers::{play, started};
use crate::domain::tic_tac_toe::{BoardOutcome, Mark, TicTacToeData};

fn board(machine: &GameMachine) -> &TicTacToeData {
    match &machine.state().data {
        GameData::TicTacToe(data) => data,
        other => panic!("expected tic-tac-toe data, got {other:?}"),
    }
}

fn place(cell: usize) -> MoveAction {
    MoveAction::Place { cell }
}

#[test]
fn x_opens_and_turns_alternate() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    assert_eq!(machine.state().current_player_index, 0);
    assert_eq!(board(&machine).active_mark, Mark::X);

    play(&mut machine, 0, place(4));
    assert_eq!(machine.state().current_player_index, 1);
    assert_eq!(board(&machine).active_mark, Mark::O);
    assert_eq!(board(&machine).at(1, 1), Some(Mark::X));

    // seat 0 may not move twice
    assert!(!machine.validate_move(&Move::at("p0", place(0), 0)));
}

#[test]
fn occupied_and_off_board_cells_are_rejected() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    play(&mut machine, 0, place(4));
    assert!(!machine.validate_move(&Move::at("p1", place(4), 0)));
    assert!(!machine.validate_move(&Move::at("p1", place(9), 0)));
    assert!(machine.validate_move(&Move::at("p1", place(8), 0)));
}

#[test]
fn completed_row_wins_and_finishes() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    for (seat, cell) in [(0, 0), (1, 3), (0, 1), (1, 4), (0, 2)] {
        play(&mut machine, seat, place(cell));
    }
    assert_eq!(machine.status(), GameStatus::Finished);
    assert_eq!(board(&machine).winner, Some(BoardOutcome::Won(Mark::X)));
    assert_eq!(board(&machine).winning_line, Some([0, 1, 2]));
    assert!(!machine.validate_move(&Move::at("p1", place(5), 0)));
}

#[test]
fn full_board_without_line_is_a_draw() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    // X O X / X O O / O X X
    for (seat, cell) in [
        (0, 0),
        (1, 1),
        (0, 2),
        (1, 4),
        (0, 3),
        (1, 5),
        (0, 7),
        (1, 6),
        (0, 8),
    ] {
        play(&mut machine, seat, place(cell));
    }
    assert_eq!(machine.status(), GameStatus::Finished);
    assert_eq!(board(&machine).winner, Some(BoardOutcome::Draw));
    assert_eq!(board(&machine).winning_line, None);
    assert_eq!(board(&machine).move_count, 9);
}

#[test]
fn o_can_win_on_a_column() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    for (seat, cell) in [(0, 0), (1, 1), (0, 2), (1, 4), (0, 3), (1, 7)] {
        play(&mut machine, seat, place(cell));
    }
    assert_eq!(board(&machine).winner, Some(BoardOutcome::Won(Mark::O)));
    assert_eq!(board(&machine).winning_line, Some([1, 4, 7]));
}
