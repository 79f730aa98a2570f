//! Bot configuration handling.
//!
//! Provides a typed interface for bot configuration, extracting standard
//! fields from the JSON blob a driver stores per bot seat while preserving
//! strategy-specific custom fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::state::PlayerId;

/// How hard a bot tries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random over the legal options.
    #[default]
    Easy,
    /// Cheap one-ply heuristics.
    Medium,
    /// History statistics and full search where the game is small enough.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty '{s}'"))
    }
}

/// Standard configuration for bot players.
///
/// # Example JSON Config
///
/// ```json
/// {
///   "botUserId": "bot-7",
///   "difficulty": "hard",
///   "seed": 12345,
///   "taunts": true
/// }
/// ```
///
/// Unknown keys (`taunts` above) land in [`custom`](Self::custom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Player id the bot acts as. Required to turn a decision into a move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_user_id: Option<PlayerId>,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Optional RNG seed for reproducible decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Strategy-specific configuration.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl BotConfig {
    /// Create a BotConfig from optional JSON value.
    ///
    /// Falls back to an empty config when the input is absent or malformed.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    /// Create an empty configuration (easy, no id, no seed).
    pub fn empty() -> Self {
        Self {
            bot_user_id: None,
            difficulty: Difficulty::Easy,
            seed: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn for_player(player_id: impl Into<PlayerId>, difficulty: Difficulty) -> Self {
        Self {
            bot_user_id: Some(player_id.into()),
            difficulty,
            ..Self::empty()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Get a custom configuration field by key.
    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::empty()
    }
}
