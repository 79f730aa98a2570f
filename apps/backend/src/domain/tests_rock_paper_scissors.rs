use crate::domain::machine::GameMachine;
use crate::domain::moves::{Move, MoveAction};
use crate::domain::rock_paper_scissors::{Choice, RpsData, RpsPhase};
use crate::domain::settings::GameSettings;
use crate::domain::state::{GameData, GameStatus, GameType, PlayerId};
use crate::domain::test_state_helpers::{lobby, play, started};

fn rps(machine: &GameMachine) -> &RpsData {
    match &machine.state().data {
        GameData::RockPaperScissors(data) => data,
        other => panic!("expected rps data, got {other:?}"),
    }
}

fn choose(choice: Choice) -> MoveAction {
    MoveAction::Choose { choice }
}

/// Everyone picks, then everyone confirms the next round.
fn round(machine: &mut GameMachine, picks: &[Choice]) {
    for (seat, c) in picks.iter().enumerate() {
        play(machine, seat, choose(*c));
    }
    if machine.status() == GameStatus::Playing {
        for seat in 0..picks.len() {
            play(machine, seat, MoveAction::Ready);
        }
    }
}

#[test]
fn choices_may_arrive_in_any_order() {
    let mut machine = started(GameType::RockPaperScissors, 3, 0);
    assert_eq!(machine.seats_to_act(), vec![0, 1, 2]);

    play(&mut machine, 2, choose(Choice::Rock));
    assert_eq!(machine.seats_to_act(), vec![0, 1]);
    assert_eq!(machine.state().current_player_index, 0);

    // a second choice from the same seat is refused
    assert!(!machine.validate_move(&Move::at("p2", choose(Choice::Paper), 0)));

    play(&mut machine, 0, choose(Choice::Rock));
    play(&mut machine, 1, choose(Choice::Rock));
    assert_eq!(rps(&machine).phase, RpsPhase::AwaitingReady);
    assert_eq!(rps(&machine).rounds.len(), 1);
    assert_eq!(rps(&machine).rounds[0].winner, None);
    assert!(rps(&machine).pending.is_empty());
}

#[test]
fn next_round_waits_for_everyone_ready() {
    let mut machine = started(GameType::RockPaperScissors, 2, 0);
    play(&mut machine, 0, choose(Choice::Paper));
    play(&mut machine, 1, choose(Choice::Rock));
    assert_eq!(rps(&machine).scores[&PlayerId::from("p0")], 1);

    assert!(!machine.validate_move(&Move::at("p0", choose(Choice::Rock), 0)));
    play(&mut machine, 1, MoveAction::Ready);
    assert_eq!(rps(&machine).phase, RpsPhase::AwaitingReady);
    assert!(!machine.validate_move(&Move::at("p1", MoveAction::Ready, 0)));

    play(&mut machine, 0, MoveAction::Ready);
    assert_eq!(rps(&machine).phase, RpsPhase::Choosing);
    assert!(rps(&machine).ready.is_empty());
}

#[test]
fn first_to_target_wins_the_tournament() {
    let mut machine = started(GameType::RockPaperScissors, 2, 0);
    round(&mut machine, &[Choice::Rock, Choice::Scissors]);
    round(&mut machine, &[Choice::Rock, Choice::Rock]);
    round(&mut machine, &[Choice::Rock, Choice::Paper]);
    round(&mut machine, &[Choice::Scissors, Choice::Paper]);
    assert_eq!(machine.status(), GameStatus::Playing);
    round(&mut machine, &[Choice::Paper, Choice::Rock]);

    assert_eq!(machine.status(), GameStatus::Finished);
    let data = rps(&machine);
    assert_eq!(data.winner, Some(PlayerId::from("p0")));
    assert_eq!(data.scores[&PlayerId::from("p0")], 3);
    assert_eq!(data.scores[&PlayerId::from("p1")], 1);
    assert_eq!(data.rounds.len(), 5);
    assert!(machine.seats_to_act().is_empty());
}

#[test]
fn shared_winning_choice_is_a_draw() {
    let mut machine = started(GameType::RockPaperScissors, 3, 0);
    round(&mut machine, &[Choice::Paper, Choice::Paper, Choice::Rock]);
    assert_eq!(rps(&machine).rounds[0].winner, None);
    assert!(rps(&machine).scores.values().all(|s| *s == 0));
}

#[test]
fn target_score_is_configurable() {
    let settings = GameSettings {
        target_score: Some(1),
        ..GameSettings::default()
    };
    let mut machine = lobby(GameType::RockPaperScissors, 2, &settings);
    machine.start_game().unwrap();
    play(&mut machine, 0, choose(Choice::Scissors));
    play(&mut machine, 1, choose(Choice::Paper));
    assert_eq!(machine.status(), GameStatus::Finished);
}

#[test]
fn turn_index_rotates_when_a_round_resolves() {
    let mut machine = started(GameType::RockPaperScissors, 3, 0);
    let epoch = machine.state().turn_epoch;

    play(&mut machine, 1, choose(Choice::Rock));
    play(&mut machine, 2, choose(Choice::Rock));
    assert_eq!(machine.state().current_player_index, 0);
    assert_eq!(machine.state().turn_epoch, epoch);

    play(&mut machine, 0, choose(Choice::Rock));
    assert_eq!(machine.state().current_player_index, 1);
    assert_eq!(machine.state().turn_epoch, epoch + 1);

    for seat in 0..3 {
        play(&mut machine, seat, MoveAction::Ready);
    }
    assert_eq!(rps(&machine).phase, RpsPhase::Choosing);
    assert_eq!(machine.state().current_player_index, 1);
    assert_eq!(machine.state().turn_epoch, epoch + 2);

    round(&mut machine, &[Choice::Paper, Choice::Paper, Choice::Paper]);
    assert_eq!(machine.state().current_player_index, 2);
    assert_eq!(machine.state().turn_epoch, epoch + 4);
}

#[test]
fn every_phase_of_a_round_is_a_new_turn_episode() {
    let mut machine = started(GameType::RockPaperScissors, 2, 0);
    let mut seen = vec![(machine.state().current_player_index, machine.state().turn_epoch)];
    for _ in 0..3 {
        round(&mut machine, &[Choice::Rock, Choice::Rock]);
        seen.push((machine.state().current_player_index, machine.state().turn_epoch));
    }
    let epochs: Vec<u64> = seen.iter().map(|(_, e)| *e).collect();
    assert!(epochs.windows(2).all(|w| w[1] == w[0] + 2), "{seen:?}");
}
