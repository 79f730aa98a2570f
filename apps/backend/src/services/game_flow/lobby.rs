use std::collections::BTreeMap;

use tracing::info;
use uuid::Uuid;

use super::mutation::GameFlowMutationResult;
use super::store::StoredGame;
use super::GameFlowService;
use crate::ai::{BotConfig, Difficulty};
use crate::domain::machine::GameMachine;
use crate::domain::settings::GameSettings;
use crate::domain::state::{GameType, PlayerId, PlayerSeat};
use crate::error::AppError;

impl GameFlowService {
    /// Create an empty game in the waiting state and return its id.
    pub async fn create_game(
        &self,
        game_type: GameType,
        settings: GameSettings,
    ) -> Result<Uuid, AppError> {
        let game_id = Uuid::new_v4();
        let bot_seed = settings.seed.unwrap_or_else(rand::random);
        let machine = GameMachine::new(game_type, &settings);

        self.store
            .create(
                game_id,
                StoredGame {
                    blob: machine.to_blob()?,
                    status: machine.status(),
                    version: 0,
                    bots: BTreeMap::new(),
                    bot_seed,
                    decisions: 0,
                },
            )
            .await?;

        info!(%game_id, %game_type, "Game created");
        Ok(game_id)
    }

    /// Seat a human player.
    pub async fn join_game(
        &self,
        game_id: Uuid,
        player: PlayerSeat,
    ) -> Result<GameFlowMutationResult, AppError> {
        let player_id = player.id.clone();
        let result = self
            .run_mutation(game_id, None, move |machine, _| {
                machine.add_player(player)?;
                Ok(true)
            })
            .await?;
        info!(%game_id, player_id = %player_id, "Player joined");
        Ok(result)
    }

    /// Seat a bot that the service will play on its own.
    pub async fn add_bot(
        &self,
        game_id: Uuid,
        player_id: impl Into<PlayerId>,
        name: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<GameFlowMutationResult, AppError> {
        let player_id = player_id.into();
        let seat = PlayerSeat::bot(player_id.clone(), name);
        let config = BotConfig::for_player(player_id.clone(), difficulty);

        let result = self
            .run_mutation(game_id, None, move |machine, stored| {
                machine.add_player(seat)?;
                stored.bots.insert(player_id, config);
                Ok(true)
            })
            .await?;
        info!(%game_id, %difficulty, "Bot joined");
        Ok(result)
    }

    /// Leave the lobby; bots that open the game act right away.
    pub async fn start_game(&self, game_id: Uuid) -> Result<GameFlowMutationResult, AppError> {
        let result = self
            .run_mutation(game_id, None, |machine, _| {
                machine.start_game()?;
                Ok(true)
            })
            .await?;
        info!(
            %game_id,
            version = result.version,
            bot_actions = result.bot_actions,
            "Game started"
        );
        Ok(result)
    }
}
