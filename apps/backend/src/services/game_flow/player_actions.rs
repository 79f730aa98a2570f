use tracing::{debug, info};
use uuid::Uuid;

use super::mutation::GameFlowMutationResult;
use super::GameFlowService;
use crate::ai::{BotPlayer, RandomPlayer};
use crate::domain::moves::Move;
use crate::domain::player_view::PlayerView;
use crate::domain::seed_derivation::derive_bot_seed;
use crate::domain::state::{GameStatus, PlayerId, Seat};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};

impl GameFlowService {
    /// Apply a human move, then let bots answer.
    ///
    /// When `expected_version` is given the move is rejected with a
    /// `VERSION_MISMATCH` conflict if the game changed since the caller last
    /// loaded it.
    pub async fn submit_move(
        &self,
        game_id: Uuid,
        mv: Move,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult, AppError> {
        debug!(
            %game_id,
            player_id = %mv.player_id(),
            move_type = mv.action().type_tag(),
            "Submitting move"
        );
        self.run_mutation(game_id, expected_version, |machine, _| {
            machine.process_move(&mv)?;
            Ok(true)
        })
        .await
    }

    /// Play a random legal move for `player_id` whose turn ran out.
    ///
    /// `turn_index` and `turn_epoch` identify the turn episode the caller's
    /// timer was counting against. Returns `Ok(true)` when the move was saved and
    /// `Ok(false)` when the turn had already moved on, the game is no longer
    /// being played or the player has nothing left to do.
    pub async fn submit_timeout_move(
        &self,
        game_id: Uuid,
        player_id: &PlayerId,
        turn_index: Seat,
        turn_epoch: u64,
    ) -> Result<bool, AppError> {
        let result = self
            .run_mutation(game_id, None, |machine, stored| {
                let state = machine.state();
                if state.status != GameStatus::Playing
                    || state.current_player_index != turn_index
                    || state.turn_epoch != turn_epoch
                {
                    return Ok(false);
                }
                let seat = state.seat_of(player_id).ok_or_else(|| {
                    DomainError::not_found(
                        NotFoundKind::Player,
                        format!("player {player_id} is not seated"),
                    )
                })?;
                let view = PlayerView::for_seat(machine, seat)?;
                if !view.can_act() {
                    return Ok(false);
                }

                let seed = derive_bot_seed(stored.bot_seed, seat, stored.decisions);
                stored.decisions += 1;
                let action = RandomPlayer::new(Some(seed)).choose_action(&view)?;
                machine.process_move(&Move::new(player_id.clone(), action))?;
                Ok(true)
            })
            .await?;

        if result.applied {
            info!(
                %game_id,
                player_id = %player_id,
                turn_index,
                turn_epoch,
                version = result.version,
                "Timeout move applied"
            );
        } else {
            debug!(
                %game_id,
                player_id = %player_id,
                turn_index,
                turn_epoch,
                "Timeout move was stale"
            );
        }
        Ok(result.applied)
    }
}
