//! Bot player trait definition.

use std::fmt;

use crate::domain::moves::MoveAction;
use crate::domain::player_view::PlayerView;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Errors that can occur during bot decision-making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// The bot config carries no player id to act as
    MissingBotUserId,
    /// The view offered nothing to choose from
    NoLegalMove(String),
    /// Bot encountered an internal error
    Internal(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::MissingBotUserId => write!(f, "bot user id is missing"),
            AiError::NoLegalMove(msg) => write!(f, "no legal move: {msg}"),
            AiError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        let code = match err {
            AiError::MissingBotUserId => ErrorCode::BotMisconfigured,
            AiError::NoLegalMove(_) | AiError::Internal(_) => ErrorCode::BotFailed,
        };
        AppError::Bot {
            code,
            detail: err.to_string(),
        }
    }
}

/// Trait for bot players.
///
/// Implementations receive the redacted view of their own seat and must
/// return one of `view.legal_actions()`. Bots never see or touch the
/// authoritative game state.
pub trait BotPlayer: Send + Sync {
    /// Choose the next action for the viewing seat.
    fn choose_action(&self, view: &PlayerView) -> Result<MoveAction, AiError>;
}
