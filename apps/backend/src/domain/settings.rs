//! Per-game options chosen at creation time.
//!
//! Settings are folded into the variant data when the machine is created, so
//! a persisted blob is self-contained and never needs the original settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_SCORE: u32 = 3;
pub const DEFAULT_DEDUCTION_ROUNDS: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Rock/paper/scissors: round wins needed to take the tournament.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_score: Option<u32>,
    /// Deduction: number of rounds before the game finishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    /// Seed for role/location assignment; drawn from the OS when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GameSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TARGET_SCORE)
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
            .filter(|r| *r > 0)
            .unwrap_or(DEFAULT_DEDUCTION_ROUNDS)
    }
}
