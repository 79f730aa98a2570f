#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;
pub mod timeout;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{AiError, BotConfig, BotEngine, Difficulty};
pub use config::engine::EngineConfig;
pub use domain::{GameMachine, GameSettings, GameStatus, GameType, Move, MoveAction, PlayerView};
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::game_flow::{
    ChannelBroadcaster, GameEvent, GameFlowService, MemoryGameStore, TurnSession,
};
pub use timeout::{TimeoutPhase, TurnInputs, TurnTimeoutController};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
