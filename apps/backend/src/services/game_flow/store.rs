//! Persistence boundary for game blobs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::BotConfig;
use crate::domain::state::{GameStatus, PlayerId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// One persisted game: the machine blob plus the driver's bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    /// Serialized `GameState`.
    pub blob: String,
    /// Status tag saved next to the blob so listings need not parse it.
    pub status: GameStatus,
    /// Bumped by the store on every successful update.
    pub version: u64,
    /// Bot seats and their configuration.
    #[serde(default)]
    pub bots: BTreeMap<PlayerId, BotConfig>,
    /// Base seed for bot and timeout decisions.
    pub bot_seed: u64,
    /// Decisions drawn so far; feeds the per-decision seed.
    #[serde(default)]
    pub decisions: u64,
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Insert a new game at version 0.
    async fn create(&self, game_id: Uuid, game: StoredGame) -> Result<(), DomainError>;

    async fn load(&self, game_id: Uuid) -> Result<Option<StoredGame>, DomainError>;

    /// Replace the record if it is still at `expected_version`. Returns the
    /// new version.
    async fn update(
        &self,
        game_id: Uuid,
        expected_version: u64,
        game: StoredGame,
    ) -> Result<u64, DomainError>;
}

/// In-process store used by tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: DashMap<Uuid, StoredGame>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn create(&self, game_id: Uuid, mut game: StoredGame) -> Result<(), DomainError> {
        game.version = 0;
        match self.games.entry(game_id) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::Other("duplicate game id".to_string()),
                format!("game {game_id} already exists"),
            )),
            Entry::Vacant(slot) => {
                slot.insert(game);
                Ok(())
            }
        }
    }

    async fn load(&self, game_id: Uuid) -> Result<Option<StoredGame>, DomainError> {
        Ok(self.games.get(&game_id).map(|g| g.value().clone()))
    }

    async fn update(
        &self,
        game_id: Uuid,
        expected_version: u64,
        mut game: StoredGame,
    ) -> Result<u64, DomainError> {
        let mut current = self.games.get_mut(&game_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
        })?;
        if current.version != expected_version {
            return Err(DomainError::conflict(
                ConflictKind::VersionMismatch,
                format!(
                    "Game version mismatch: expected {}, but game has version {}",
                    expected_version, current.version
                ),
            ));
        }
        game.version = expected_version + 1;
        let version = game.version;
        *current = game;
        Ok(version)
    }
}
