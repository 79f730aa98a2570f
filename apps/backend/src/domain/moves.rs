//! Move descriptors exchanged with the driver.
//!
//! On the wire a move is `{ "playerId", "type", "data", "timestamp" }`:
//! the action enum is adjacently tagged and flattened into the move.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rock_paper_scissors::Choice;
use crate::domain::state::PlayerId;

/// Variant-specific action carried by a [`Move`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MoveAction {
    /// Three-in-a-row: mark the cell `0..9` (row-major).
    Place { cell: usize },
    /// Rock/paper/scissors: lock in a choice for the open round.
    Choose { choice: Choice },
    /// Rock/paper/scissors: confirm readiness for the next round.
    Ready,
    /// Deduction: question another seat.
    Ask { target: PlayerId },
    /// Deduction: the spy names the secret location.
    GuessLocation { location: String },
    /// Deduction: accuse a seat during the vote.
    Vote { suspect: PlayerId },
}

impl MoveAction {
    /// Tag as it appears in the `type` field.
    pub const fn type_tag(&self) -> &'static str {
        match self {
            MoveAction::Place { .. } => "place",
            MoveAction::Choose { .. } => "choose",
            MoveAction::Ready => "ready",
            MoveAction::Ask { .. } => "ask",
            MoveAction::GuessLocation { .. } => "guess_location",
            MoveAction::Vote { .. } => "vote",
        }
    }
}

/// A single player-submitted action. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    player_id: PlayerId,
    #[serde(flatten)]
    action: MoveAction,
    /// Unix milliseconds.
    timestamp: i64,
}

impl Move {
    /// Stamp a move with the current wall-clock time.
    pub fn new(player_id: impl Into<PlayerId>, action: MoveAction) -> Self {
        let now = OffsetDateTime::now_utc();
        let millis = (now.unix_timestamp_nanos() / 1_000_000) as i64;
        Self::at(player_id, action, millis)
    }

    /// Build a move with an explicit timestamp (replays, tests).
    pub fn at(player_id: impl Into<PlayerId>, action: MoveAction, timestamp: i64) -> Self {
        Self {
            player_id: player_id.into(),
            action,
            timestamp,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn action(&self) -> &MoveAction {
        &self.action
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn type_tag(&self) -> &'static str {
        self.action.type_tag()
    }
}
