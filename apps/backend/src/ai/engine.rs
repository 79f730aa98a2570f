//! Bot decision engine: difficulty lookup, off-thread decisions, move tagging.

use std::sync::Arc;

use tracing::debug;

use super::config::BotConfig;
use super::registry;
use super::trait_def::{AiError, BotPlayer};
use crate::domain::moves::{Move, MoveAction};
use crate::domain::player_view::PlayerView;

/// Drives one configured bot.
///
/// The engine never touches game state: it reads a [`PlayerView`] and hands
/// back an action that the driver submits like any other move.
pub struct BotEngine {
    config: BotConfig,
    player: Arc<dyn BotPlayer>,
}

impl BotEngine {
    /// Build the strategy registered for `config.difficulty`.
    pub fn new(config: BotConfig) -> Self {
        let factory = registry::by_difficulty(config.difficulty);
        let player = (factory.make)(config.seed);
        Self { config, player }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Pick a legal action for the viewing seat.
    ///
    /// Search-heavy strategies run on the blocking pool so the caller's
    /// executor stays responsive.
    pub async fn make_decision(&self, view: &PlayerView) -> Result<MoveAction, AiError> {
        let player = Arc::clone(&self.player);
        let view = view.clone();
        let difficulty = self.config.difficulty;

        let action = tokio::task::spawn_blocking(move || {
            let action = player.choose_action(&view)?;
            if !view.legal_actions().contains(&action) {
                return Err(AiError::Internal(format!(
                    "strategy produced illegal {} for seat {}",
                    action.type_tag(),
                    view.seat
                )));
            }
            Ok(action)
        })
        .await
        .map_err(|e| AiError::Internal(format!("decision task failed: {e}")))??;

        debug!(%difficulty, move_type = action.type_tag(), "Bot decided");
        Ok(action)
    }

    /// Tag `decision` with the configured bot id.
    pub fn decision_to_move(&self, decision: MoveAction) -> Result<Move, AiError> {
        let bot_id = self
            .config
            .bot_user_id
            .clone()
            .ok_or(AiError::MissingBotUserId)?;
        Ok(Move::new(bot_id, decision))
    }

    /// `make_decision` followed by `decision_to_move`.
    pub async fn decide_move(&self, view: &PlayerView) -> Result<Move, AiError> {
        let decision = self.make_decision(view).await?;
        self.decision_to_move(decision)
    }
}
