//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Every random draw in the engine comes from a seed derived from the game
//! seed, so replaying the same move sequence yields identical states.

/// Derive the seed used to assign roles and the location for a deduction round.
///
/// Same game seed + round number always yields the same assignment.
pub fn derive_round_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive a per-seat seed for a bot so bots sharing a game seed diverge.
pub fn derive_bot_seed(base_seed: u64, seat: usize, decision_no: u64) -> u64 {
    base_seed
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(decision_no.wrapping_mul(10_007))
        .wrapping_add(1)
}
