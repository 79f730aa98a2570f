use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::deduction::DeductionData;
use crate::domain::rock_paper_scissors::RpsData;
use crate::domain::tic_tac_toe::TicTacToeData;

/// Stable player identity supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Positional index into `GameState::players`.
pub type Seat = usize;

/// One occupied seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeat {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_bot: bool,
}

impl PlayerSeat {
    pub fn human(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot: true,
        }
    }
}

/// Coarse lifecycle of a game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Lobby: seats may still be added.
    Waiting,
    /// Moves are accepted.
    Playing,
    /// Terminal; `data` is frozen.
    Finished,
}

/// Closed set of supported rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    TicTacToe,
    RockPaperScissors,
    Deduction,
}

impl GameType {
    pub const ALL: [GameType; 3] = [
        GameType::TicTacToe,
        GameType::RockPaperScissors,
        GameType::Deduction,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            GameType::TicTacToe => "tic_tac_toe",
            GameType::RockPaperScissors => "rock_paper_scissors",
            GameType::Deduction => "deduction",
        }
    }

    /// Inclusive seat range required by `start_game`.
    pub const fn player_range(&self) -> (usize, usize) {
        match self {
            GameType::TicTacToe => (2, 2),
            GameType::RockPaperScissors => (2, 4),
            GameType::Deduction => (3, 8),
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown game type '{s}'"))
    }
}

/// Variant-specific payload, tagged by rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "state", rename_all = "snake_case")]
pub enum GameData {
    TicTacToe(TicTacToeData),
    RockPaperScissors(RpsData),
    Deduction(DeductionData),
}

impl GameData {
    pub fn game_type(&self) -> GameType {
        match self {
            GameData::TicTacToe(_) => GameType::TicTacToe,
            GameData::RockPaperScissors(_) => GameType::RockPaperScissors,
            GameData::Deduction(_) => GameType::Deduction,
        }
    }
}

/// Authoritative snapshot of one game instance.
///
/// `current_player_index` indexes `players` whenever `status` is `Playing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: GameStatus,
    pub current_player_index: Seat,
    /// Bumped whenever a new turn episode opens: the active seat moved, or
    /// a phase boundary (round resolved, voting opened) handed the table a
    /// fresh obligation.
    #[serde(default)]
    pub turn_epoch: u64,
    pub players: Vec<PlayerSeat>,
    pub data: GameData,
}

impl GameState {
    pub fn game_type(&self) -> GameType {
        self.data.game_type()
    }

    pub fn seat_of(&self, player_id: &PlayerId) -> Option<Seat> {
        self.players.iter().position(|p| &p.id == player_id)
    }

    pub fn current_player(&self) -> Option<&PlayerSeat> {
        match self.status {
            GameStatus::Playing => self.players.get(self.current_player_index),
            _ => None,
        }
    }
}

/// Seat / turn math helpers.
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: isize, seats: usize) -> Seat {
    debug_assert!(seats > 0, "seat math needs at least one seat");
    (seat as isize + delta).rem_euclid(seats as isize) as Seat
}

/// Returns the next seat clockwise.
#[inline]
pub fn next_seat(seat: Seat, seats: usize) -> Seat {
    seat_offset(seat, 1, seats)
}
