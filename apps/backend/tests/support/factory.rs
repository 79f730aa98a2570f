//! Builders for an in-memory game flow service.

use std::sync::Arc;

use backend_test_support::unique_helpers::unique_player_ids;
use gamehall::domain::{PlayerId, PlayerSeat};
use gamehall::services::game_flow::{ChannelBroadcaster, GameFlowService, MemoryGameStore};
use gamehall::{AppError, EngineConfig};
use uuid::Uuid;

/// Service plus handles on its collaborators.
pub struct TestEngine {
    pub service: Arc<GameFlowService>,
    pub hub: Arc<ChannelBroadcaster>,
    pub store: Arc<MemoryGameStore>,
}

pub fn build_service() -> TestEngine {
    build_service_with(EngineConfig::default())
}

pub fn build_service_with(config: EngineConfig) -> TestEngine {
    let store = Arc::new(MemoryGameStore::new());
    let hub = Arc::new(ChannelBroadcaster::new());
    let service = Arc::new(GameFlowService::new(
        store.clone(),
        hub.clone(),
        config,
    ));
    TestEngine {
        service,
        hub,
        store,
    }
}

/// Seat `count` humans with unique ids, in seat order.
pub async fn seat_humans(
    engine: &TestEngine,
    game_id: Uuid,
    count: usize,
) -> Result<Vec<PlayerId>, AppError> {
    let mut ids = Vec::with_capacity(count);
    for raw in unique_player_ids("human", count) {
        let id = PlayerId::new(raw);
        engine
            .service
            .join_game(game_id, PlayerSeat::human(id.clone(), id.to_string()))
            .await?;
        ids.push(id);
    }
    Ok(ids)
}
