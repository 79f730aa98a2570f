// Proptest generators for domain types.
// Lobbies always fit the variant's seat range so `start_game` succeeds.

use proptest::prelude::*;

use crate::domain::deduction::LOCATIONS;
use crate::domain::moves::MoveAction;
use crate::domain::rock_paper_scissors::Choice;
use crate::domain::state::{GameType, PlayerId};

/// Generate a random GameType
pub fn game_type() -> impl Strategy<Value = GameType> {
    prop_oneof![
        Just(GameType::TicTacToe),
        Just(GameType::RockPaperScissors),
        Just(GameType::Deduction),
    ]
}

/// Generate a GameType together with a legal seat count for it
pub fn game_type_and_seats() -> impl Strategy<Value = (GameType, usize)> {
    game_type().prop_flat_map(|t| {
        let (min, max) = t.player_range();
        (Just(t), min..=max)
    })
}

/// Generate a random Choice
pub fn choice() -> impl Strategy<Value = Choice> {
    prop_oneof![
        Just(Choice::Rock),
        Just(Choice::Paper),
        Just(Choice::Scissors),
    ]
}

/// Generate a player id: seated ones `p0..p7` plus an unknown `ghost`
pub fn player_id() -> impl Strategy<Value = PlayerId> {
    prop_oneof![
        (0usize..8).prop_map(|i| PlayerId::new(format!("p{i}"))),
        Just(PlayerId::from("ghost")),
    ]
}

/// Generate any action, legal or not, for any variant
pub fn any_action() -> impl Strategy<Value = MoveAction> {
    prop_oneof![
        (0usize..12).prop_map(|cell| MoveAction::Place { cell }),
        choice().prop_map(|choice| MoveAction::Choose { choice }),
        Just(MoveAction::Ready),
        player_id().prop_map(|target| MoveAction::Ask { target }),
        prop_oneof![
            (0..LOCATIONS.len()).prop_map(|i| LOCATIONS[i].to_string()),
            Just("moon".to_string()),
        ]
        .prop_map(|location| MoveAction::GuessLocation { location }),
        player_id().prop_map(|suspect| MoveAction::Vote { suspect }),
    ]
}

/// Sequence of (seat pick, action pick) pairs for `test_state_helpers::drive`
pub fn picks(max_len: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((any::<usize>(), any::<usize>()), 0..max_len)
}
