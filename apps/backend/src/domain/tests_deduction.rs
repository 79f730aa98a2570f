use crate::domain::deduction::{
    DeductionData, DeductionPhase, CIVILIAN_WIN_POINTS, LOCATIONS, SPY_WIN_POINTS,
};
use crate::domain::machine::GameMachine;
use crate::domain::moves::{Move, MoveAction};
use crate::domain::settings::GameSettings;
use crate::domain::state::{GameData, GameStatus, GameType, PlayerId, Seat};
use crate::domain::test_state_helpers::{lobby, play, started};

fn deduction(machine: &GameMachine) -> &DeductionData {
    match &machine.state().data {
        GameData::Deduction(data) => data,
        other => panic!("expected deduction data, got {other:?}"),
    }
}

fn id(seat: Seat) -> PlayerId {
    PlayerId::new(format!("p{seat}"))
}

fn spy_seat(machine: &GameMachine) -> Seat {
    let spy = deduction(machine).spy.clone().unwrap();
    machine.state().seat_of(&spy).unwrap()
}

/// Ask round the table: each asker questions the next seat along.
fn question_round(machine: &mut GameMachine) {
    let seats = machine.state().players.len();
    for _ in 0..seats {
        let asker = machine.state().current_player_index;
        play(
            machine,
            asker,
            MoveAction::Ask {
                target: id((asker + 1) % seats),
            },
        );
    }
}

fn single_round_game(seats: usize, seed: u64) -> GameMachine {
    let settings = GameSettings {
        rounds: Some(1),
        seed: Some(seed),
        ..GameSettings::default()
    };
    let mut machine = lobby(GameType::Deduction, seats, &settings);
    machine.start_game().unwrap();
    machine
}

#[test]
fn first_round_opens_at_seat_zero() {
    let machine = started(GameType::Deduction, 4, 11);
    let data = deduction(&machine);
    assert_eq!(data.round, 1);
    assert_eq!(data.phase, DeductionPhase::Questioning);
    assert_eq!(machine.state().current_player_index, 0);
    assert!(LOCATIONS.contains(&data.location.as_deref().unwrap()));
    assert_eq!(machine.seats_to_act(), vec![0]);
}

#[test]
fn same_seed_same_assignment() {
    let a = started(GameType::Deduction, 5, 99);
    let b = started(GameType::Deduction, 5, 99);
    assert_eq!(deduction(&a).spy, deduction(&b).spy);
    assert_eq!(deduction(&a).location, deduction(&b).location);
}

#[test]
fn target_asks_next_and_may_not_ask_back() {
    let mut machine = started(GameType::Deduction, 4, 5);
    play(&mut machine, 0, MoveAction::Ask { target: id(2) });
    assert_eq!(machine.state().current_player_index, 2);

    assert!(!machine.validate_move(&Move::at(id(2), MoveAction::Ask { target: id(0) }, 0)));
    assert!(!machine.validate_move(&Move::at(id(2), MoveAction::Ask { target: id(2) }, 0)));
    assert!(!machine.validate_move(&Move::at(id(1), MoveAction::Ask { target: id(3) }, 0)));
    assert!(machine.validate_move(&Move::at(id(2), MoveAction::Ask { target: id(3) }, 0)));
}

#[test]
fn questioning_ends_after_one_question_per_seat() {
    let mut machine = started(GameType::Deduction, 3, 5);
    question_round(&mut machine);
    let data = deduction(&machine);
    assert_eq!(data.phase, DeductionPhase::Voting);
    assert_eq!(data.questions.len(), 3);
    assert_eq!(machine.state().current_player_index, data.first_asker);
    assert_eq!(machine.seats_to_act(), vec![0, 1, 2]);
}

#[test]
fn voting_opens_a_new_turn_episode_at_the_same_seat() {
    let mut machine = started(GameType::Deduction, 4, 5);
    play(&mut machine, 0, MoveAction::Ask { target: id(1) });
    play(&mut machine, 1, MoveAction::Ask { target: id(2) });
    play(&mut machine, 2, MoveAction::Ask { target: id(0) });
    let before = machine.state().turn_epoch;

    play(&mut machine, 0, MoveAction::Ask { target: id(3) });
    assert_eq!(deduction(&machine).phase, DeductionPhase::Voting);
    assert_eq!(machine.state().current_player_index, 0);
    assert_eq!(machine.state().turn_epoch, before + 1);
}

#[test]
fn votes_before_the_last_keep_the_episode() {
    let mut machine = started(GameType::Deduction, 3, 5);
    question_round(&mut machine);
    let epoch = machine.state().turn_epoch;
    play(&mut machine, 1, MoveAction::Vote { suspect: id(2) });
    assert_eq!(machine.state().turn_epoch, epoch);
}

#[test]
fn only_the_spy_may_guess_the_location() {
    let machine = started(GameType::Deduction, 3, 8);
    let spy = spy_seat(&machine);
    let guess = MoveAction::GuessLocation {
        location: LOCATIONS[0].to_string(),
    };
    let current = machine.state().current_player_index;
    assert_eq!(
        machine.validate_move(&Move::at(id(current), guess.clone(), 0)),
        current == spy
    );
    assert!(!machine.validate_move(&Move::at(
        id(current),
        MoveAction::GuessLocation {
            location: "moon".into()
        },
        0
    )));
}

#[test]
fn voting_out_the_spy_rewards_civilians() {
    let mut machine = single_round_game(4, 21);
    question_round(&mut machine);
    let spy = spy_seat(&machine);
    let scapegoat = (spy + 1) % 4;

    for seat in 0..4 {
        let suspect = if seat == spy { scapegoat } else { spy };
        play(&mut machine, seat, MoveAction::Vote { suspect: id(suspect) });
    }

    assert_eq!(machine.status(), GameStatus::Finished);
    let data = deduction(&machine);
    let result = &data.history[0];
    assert!(!result.spy_won);
    assert_eq!(result.accused, Some(id(spy)));
    for seat in 0..4 {
        let expected = if seat == spy { 0 } else { CIVILIAN_WIN_POINTS };
        assert_eq!(data.scores[&id(seat)], expected);
    }
    // three civilians tie on one point each
    assert_eq!(data.winner, None);
}

#[test]
fn tied_vote_lets_the_spy_win() {
    let mut machine = single_round_game(4, 21);
    question_round(&mut machine);
    let spy = spy_seat(&machine);
    // every seat accuses its left-hand neighbour: four-way tie
    for seat in 0..4 {
        play(
            &mut machine,
            seat,
            MoveAction::Vote {
                suspect: id((seat + 1) % 4),
            },
        );
    }
    let data = deduction(&machine);
    assert!(data.history[0].spy_won);
    assert_eq!(data.history[0].accused, None);
    assert_eq!(data.scores[&id(spy)], SPY_WIN_POINTS);
    assert_eq!(data.winner, Some(id(spy)));
}

#[test]
fn double_vote_and_self_vote_are_rejected() {
    let mut machine = started(GameType::Deduction, 3, 2);
    question_round(&mut machine);
    assert!(!machine.validate_move(&Move::at(id(0), MoveAction::Vote { suspect: id(0) }, 0)));
    play(&mut machine, 0, MoveAction::Vote { suspect: id(1) });
    assert!(!machine.validate_move(&Move::at(id(0), MoveAction::Vote { suspect: id(2) }, 0)));
    assert_eq!(machine.seats_to_act(), vec![1, 2]);
}

#[test]
fn rounds_advance_and_openers_rotate() {
    let mut machine = started(GameType::Deduction, 3, 4);
    question_round(&mut machine);
    for seat in 0..3 {
        play(
            &mut machine,
            seat,
            MoveAction::Vote {
                suspect: id((seat + 1) % 3),
            },
        );
    }
    let data = deduction(&machine);
    assert_eq!(data.round, 2);
    assert_eq!(data.history.len(), 1);
    assert_eq!(data.phase, DeductionPhase::Questioning);
    assert!(data.questions.is_empty() && data.votes.is_empty());
    assert_eq!(machine.state().current_player_index, 1);
}

#[test]
fn spy_guess_resolves_the_round_immediately() {
    // find a seed whose first-round spy opens the questioning
    let (mut machine, location) = (0u64..)
        .map(|seed| single_round_game(3, seed))
        .find(|m| spy_seat(m) == 0)
        .map(|m| {
            let location = deduction(&m).location.clone().unwrap();
            (m, location)
        })
        .unwrap();

    play(&mut machine, 0, MoveAction::GuessLocation { location });
    assert_eq!(machine.status(), GameStatus::Finished);
    let data = deduction(&machine);
    assert!(data.history[0].spy_won);
    assert_eq!(data.winner, Some(id(0)));
}
