use crate::domain::machine::GameMachine;
use crate::domain::moves::{Move, MoveAction};
use crate::domain::settings::GameSettings;
use crate::domain::state::{GameData, GameStatus, GameType, PlayerSeat};
use crate::domain::test_state_helpers::{lobby, play, started};
use crate::domain::tic_tac_toe::Mark;
use crate::errors::domain::{DomainError, InvalidStateKind, ValidationKind};

fn invalid_state_kind(err: DomainError) -> InvalidStateKind {
    match err {
        DomainError::InvalidState(kind, _) => kind,
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn new_machine_is_an_empty_lobby() {
    let machine = GameMachine::new(GameType::TicTacToe, &GameSettings::default());
    assert_eq!(machine.status(), GameStatus::Waiting);
    assert!(machine.state().players.is_empty());
    assert_eq!(machine.state().current_player(), None);
    assert!(machine.seats_to_act().is_empty());
}

#[test]
fn add_player_respects_max_seats() {
    let mut machine = lobby(GameType::TicTacToe, 2, &GameSettings::default());
    let err = machine
        .add_player(PlayerSeat::human("late", "Late"))
        .unwrap_err();
    assert_eq!(invalid_state_kind(err), InvalidStateKind::PlayerLimitReached);
    assert_eq!(machine.state().players.len(), 2);
}

#[test]
fn add_player_rejects_duplicates() {
    let mut machine = lobby(GameType::Deduction, 3, &GameSettings::with_seed(1));
    let err = machine.add_player(PlayerSeat::human("p1", "Again")).unwrap_err();
    assert_eq!(invalid_state_kind(err), InvalidStateKind::DuplicatePlayer);
}

#[test]
fn add_player_after_start_is_invalid_state() {
    let mut machine = started(GameType::RockPaperScissors, 2, 1);
    let err = machine.add_player(PlayerSeat::bot("b", "Bot")).unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(invalid_state_kind(err), InvalidStateKind::AlreadyStarted);
}

#[test]
fn start_game_checks_seat_range() {
    for (game_type, too_few) in [
        (GameType::TicTacToe, 1),
        (GameType::RockPaperScissors, 1),
        (GameType::Deduction, 2),
    ] {
        let mut machine = lobby(game_type, too_few, &GameSettings::with_seed(3));
        let err = machine.start_game().unwrap_err();
        assert_eq!(
            invalid_state_kind(err),
            InvalidStateKind::PlayerCountOutOfRange,
            "{game_type}"
        );
        assert_eq!(machine.status(), GameStatus::Waiting);
    }
}

#[test]
fn start_game_twice_is_rejected() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    let err = machine.start_game().unwrap_err();
    assert_eq!(invalid_state_kind(err), InvalidStateKind::AlreadyStarted);
}

#[test]
fn moves_before_start_are_invalid() {
    let machine = lobby(GameType::TicTacToe, 2, &GameSettings::default());
    let mv = Move::at("p0", MoveAction::Place { cell: 4 }, 0);
    assert!(!machine.validate_move(&mv));
}

#[test]
fn unseated_player_cannot_move() {
    let mut machine = started(GameType::RockPaperScissors, 2, 0);
    let mv = Move::at(
        "ghost",
        MoveAction::Choose {
            choice: crate::domain::rock_paper_scissors::Choice::Rock,
        },
        0,
    );
    assert!(!machine.validate_move(&mv));
    assert!(machine.process_move(&mv).is_err());
}

#[test]
fn foreign_move_tag_is_unknown_to_variant() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    let err = machine
        .process_move(&Move::at("p0", MoveAction::Ready, 0))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownMoveType, _)
    ));
}

#[test]
fn restore_rejects_out_of_bounds_index() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    let mut broken = machine.get_state();
    broken.current_player_index = 2;

    let err = machine.restore_state(broken.clone()).unwrap_err();
    assert_eq!(invalid_state_kind(err), InvalidStateKind::CorruptSnapshot);
    assert!(GameMachine::from_state(broken).is_err());
    assert_eq!(machine.state().current_player_index, 0);
}

#[test]
fn restore_rejects_a_move_count_the_board_disagrees_with() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    play(&mut machine, 0, MoveAction::Place { cell: 4 });

    let mut inflated = machine.get_state();
    let GameData::TicTacToe(board) = &mut inflated.data else {
        panic!("expected tic-tac-toe data");
    };
    board.move_count = 255;
    let err = machine.restore_state(inflated).unwrap_err();
    assert_eq!(invalid_state_kind(err), InvalidStateKind::CorruptSnapshot);

    let mut lopsided = machine.get_state();
    let GameData::TicTacToe(board) = &mut lopsided.data else {
        panic!("expected tic-tac-toe data");
    };
    board.board[0] = Some(Mark::X);
    board.move_count = 2;
    let err = GameMachine::from_state(lopsided).unwrap_err();
    assert_eq!(invalid_state_kind(err), InvalidStateKind::CorruptSnapshot);

    let GameData::TicTacToe(board) = &machine.state().data else {
        panic!("expected tic-tac-toe data");
    };
    assert_eq!(board.move_count, 1);
}

#[test]
fn restore_replaces_snapshot() {
    let mut machine = started(GameType::TicTacToe, 2, 0);
    let snapshot = machine.get_state();
    play(&mut machine, 0, MoveAction::Place { cell: 0 });
    assert_ne!(machine.get_state(), snapshot);

    machine.restore_state(snapshot.clone()).unwrap();
    assert_eq!(machine.get_state(), snapshot);
}

#[test]
fn malformed_blob_is_a_serialization_error() {
    let err = GameMachine::from_blob("{\"status\":\"playing\"").unwrap_err();
    assert!(matches!(err, DomainError::Infra(..)));
}

#[test]
fn blob_uses_tagged_variant_payload() {
    let machine = started(GameType::RockPaperScissors, 3, 0);
    let value: serde_json::Value = serde_json::from_str(&machine.to_blob().unwrap()).unwrap();
    assert_eq!(value["status"], "playing");
    assert_eq!(value["currentPlayerIndex"], 0);
    assert_eq!(value["data"]["variant"], "rock_paper_scissors");
    assert_eq!(value["data"]["state"]["targetScore"], 3);
    assert_eq!(value["players"].as_array().map(Vec::len), Some(3));
}

#[test]
fn custom_settings_are_folded_into_the_blob() {
    let settings = GameSettings {
        target_score: Some(5),
        ..GameSettings::default()
    };
    let mut machine = lobby(GameType::RockPaperScissors, 2, &settings);
    machine.start_game().unwrap();
    let value: serde_json::Value = serde_json::from_str(&machine.to_blob().unwrap()).unwrap();
    assert_eq!(value["data"]["state"]["targetScore"], 5);
}
