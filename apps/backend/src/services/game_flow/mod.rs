//! Game flow orchestration service - bridges the pure game machine with a
//! persistence store and a real-time broadcaster.
//!
//! Every write goes through [`GameFlowService::run_mutation`]: take the
//! per-game lock, load and rehydrate the blob, apply the change, let bots
//! act, save with a version check, then publish events.

mod bot_coordinator;
mod broadcaster;
mod lobby;
mod mutation;
mod player_actions;
mod session;
mod store;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub use broadcaster::{Broadcaster, ChannelBroadcaster, GameEvent, TurnSnapshot};
pub use mutation::GameFlowMutationResult;
pub use session::TurnSession;
pub use store::{GameStore, MemoryGameStore, StoredGame};

use crate::config::engine::EngineConfig;
use crate::domain::machine::GameMachine;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{GameState, PlayerId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game flow service: the single writer for every game it manages.
pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    broadcaster: Arc<dyn Broadcaster>,
    config: EngineConfig,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl GameFlowService {
    pub fn new(
        store: Arc<dyn GameStore>,
        broadcaster: Arc<dyn Broadcaster>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            broadcaster,
            config,
            locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Redacted view of `game_id` for `player_id`.
    pub async fn load_view(&self, game_id: Uuid, player_id: &PlayerId) -> Result<PlayerView, AppError> {
        let stored = self.require_game(game_id).await?;
        let machine = GameMachine::from_blob(&stored.blob)?;
        Ok(PlayerView::for_player(&machine, player_id)?)
    }

    /// Full, unredacted state with its stored version.
    pub async fn load_state(&self, game_id: Uuid) -> Result<(GameState, u64), AppError> {
        let stored = self.require_game(game_id).await?;
        let machine = GameMachine::from_blob(&stored.blob)?;
        Ok((machine.get_state(), stored.version))
    }

    async fn require_game(&self, game_id: Uuid) -> Result<StoredGame, AppError> {
        self.store.load(game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found")).into()
        })
    }

    fn lock_for(&self, game_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the game's lock once no caller holds or waits on it. The map
    /// shard stays locked across the check, so a concurrent `lock_for`
    /// either sees the old entry or inserts a fresh one.
    fn release_lock(&self, game_id: Uuid) {
        self.locks
            .remove_if(&game_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
