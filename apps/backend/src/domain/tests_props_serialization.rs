//! Property-based tests for snapshot persistence.
//! A blob written at any point of any game restores to an identical machine
//! and re-serializes to the same bytes.

use proptest::prelude::*;

use crate::domain::machine::GameMachine;
use crate::domain::test_state_helpers::{drive, started};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_blob_restores_identically(
        (game_type, seats) in test_gens::game_type_and_seats(),
        seed in any::<u64>(),
        picks in test_gens::picks(80),
    ) {
        let mut machine = started(game_type, seats, seed);
        for pick in picks {
            let blob = machine.to_blob().unwrap();
            let restored = GameMachine::from_blob(&blob).unwrap();
            prop_assert_eq!(&restored, &machine);
            prop_assert_eq!(restored.to_blob().unwrap(), blob);
            drive(&mut machine, &[pick]);
        }
    }

    /// Restoring mid-game and continuing matches never having persisted.
    #[test]
    fn prop_rehydration_does_not_change_the_game(
        (game_type, seats) in test_gens::game_type_and_seats(),
        seed in any::<u64>(),
        picks in test_gens::picks(80),
        split in 0usize..80,
    ) {
        let split = split.min(picks.len());
        let mut straight = started(game_type, seats, seed);
        drive(&mut straight, &picks);

        let mut persisted = started(game_type, seats, seed);
        drive(&mut persisted, &picks[..split]);
        let mut rehydrated = GameMachine::from_blob(&persisted.to_blob().unwrap()).unwrap();
        drive(&mut rehydrated, &picks[split..]);

        prop_assert_eq!(rehydrated.get_state(), straight.get_state());
    }
}
