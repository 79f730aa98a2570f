use tracing::debug;
use uuid::Uuid;

use super::broadcaster::{GameEvent, TurnSnapshot};
use super::store::StoredGame;
use super::GameFlowService;
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::machine::GameMachine;
use crate::domain::state::GameStatus;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFlowMutationResult {
    pub game_id: Uuid,
    /// False when the mutation found nothing to do; nothing was saved.
    pub applied: bool,
    pub old_version: u64,
    pub version: u64,
    pub status: GameStatus,
    pub transitions: Vec<GameTransition>,
    pub bot_actions: usize,
}

impl GameFlowService {
    /// Load, mutate, let bots act, save and publish, all under the game's lock.
    ///
    /// `mutation` returns whether it changed the machine. When it did not,
    /// the store is left untouched and no events are published.
    pub(super) async fn run_mutation<F>(
        &self,
        game_id: Uuid,
        expected_version: Option<u64>,
        mutation: F,
    ) -> Result<GameFlowMutationResult, AppError>
    where
        F: FnOnce(&mut GameMachine, &mut StoredGame) -> Result<bool, AppError>,
    {
        let lock = self.lock_for(game_id);
        let result = {
            let _guard = lock.lock().await;
            self.mutate_locked(game_id, expected_version, mutation).await
        };
        drop(lock);
        self.release_lock(game_id);
        result
    }

    async fn mutate_locked<F>(
        &self,
        game_id: Uuid,
        expected_version: Option<u64>,
        mutation: F,
    ) -> Result<GameFlowMutationResult, AppError>
    where
        F: FnOnce(&mut GameMachine, &mut StoredGame) -> Result<bool, AppError>,
    {
        let mut stored = self.require_game(game_id).await?;
        let old_version = stored.version;

        if let Some(expected) = expected_version {
            if expected != old_version {
                return Err(DomainError::conflict(
                    ConflictKind::VersionMismatch,
                    format!(
                        "Game version mismatch: expected {}, but game has version {}",
                        expected, old_version
                    ),
                )
                .into());
            }
        }

        let mut machine = GameMachine::from_blob(&stored.blob)?;
        let before = GameLifecycleView::of(&machine);

        if !mutation(&mut machine, &mut stored)? {
            debug!(%game_id, version = old_version, "Mutation was a no-op");
            return Ok(GameFlowMutationResult {
                game_id,
                applied: false,
                old_version,
                version: old_version,
                status: machine.status(),
                transitions: Vec::new(),
                bot_actions: 0,
            });
        }

        let mut steps = vec![TurnSnapshot::of(&machine)];
        let bot_actions = self
            .run_bot_turns(game_id, &mut machine, &mut stored, &mut steps)
            .await?;

        let after = GameLifecycleView::of(&machine);
        let transitions = derive_game_transitions(&before, &after);

        stored.blob = machine.to_blob()?;
        stored.status = machine.status();
        let version = self.store.update(game_id, old_version, stored).await?;

        debug!(
            %game_id,
            old_version,
            version,
            bot_actions,
            transitions = transitions.len(),
            "Game mutation saved"
        );

        for step in steps {
            self.broadcaster.publish(step.into_event(game_id, version));
        }
        for transition in &transitions {
            if let GameTransition::TurnBecame { player_id } = transition {
                self.broadcaster.publish(GameEvent::YourTurn {
                    game_id,
                    player_id: player_id.clone(),
                    version,
                });
            }
        }

        Ok(GameFlowMutationResult {
            game_id,
            applied: true,
            old_version,
            version,
            status: after.status,
            transitions,
            bot_actions,
        })
    }
}
