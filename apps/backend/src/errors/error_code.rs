//! Error codes for the gamehall core.
//!
//! This module defines all error codes used throughout the crate.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! a driver surfaces to its clients.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move validation
    /// Move rejected by the variant rules
    IllegalMove,
    /// Move submitted by a seat that may not act now
    OutOfTurn,
    /// Move does not fit the current phase
    PhaseMismatch,
    /// Move tag unknown to the variant
    UnknownMoveType,
    /// General validation error
    ValidationError,

    // Lifecycle
    /// Game already left the waiting state
    GameAlreadyStarted,
    /// Seat limit reached
    PlayerLimitReached,
    /// Player count outside the variant range
    PlayerCountOutOfRange,
    /// Player id already seated
    DuplicatePlayer,
    /// Game is not being played
    GameNotPlaying,
    /// Snapshot breaks a state invariant
    CorruptSnapshot,
    /// General invalid state transition
    InvalidState,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Generic conflict
    Conflict,
    /// Stored blob changed since it was loaded
    VersionMismatch,

    // Bots
    /// Bot constructed without the data it needs
    BotMisconfigured,
    /// Bot failed to produce a decision
    BotFailed,

    // System Errors
    /// Blob (de)serialization failure
    SerializationError,
    /// Persistence collaborator failure
    StoreError,
    /// Internal error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::UnknownMoveType => "UNKNOWN_MOVE_TYPE",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::PlayerLimitReached => "PLAYER_LIMIT_REACHED",
            Self::PlayerCountOutOfRange => "PLAYER_COUNT_OUT_OF_RANGE",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::GameNotPlaying => "GAME_NOT_PLAYING",
            Self::CorruptSnapshot => "CORRUPT_SNAPSHOT",
            Self::InvalidState => "INVALID_STATE",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::Conflict => "CONFLICT",
            Self::VersionMismatch => "VERSION_MISMATCH",

            Self::BotMisconfigured => "BOT_MISCONFIGURED",
            Self::BotFailed => "BOT_FAILED",

            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::StoreError => "STORE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
