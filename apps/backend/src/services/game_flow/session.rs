//! Server-side turn watchdog for one seated player.
//!
//! A session follows the game's broadcast channel, feeds every state change
//! into a [`TurnTimeoutController`] and, when the player's budget runs out,
//! submits a timeout move through the service.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use super::broadcaster::GameEvent;
use super::GameFlowService;
use crate::domain::state::PlayerId;
use crate::error::AppError;
use crate::timeout::{timeout_callback, TimeoutPhase, TurnInputs, TurnTimeoutController};

pub struct TurnSession {
    controller: Arc<TurnTimeoutController>,
    cancel: CancellationToken,
    follower: Option<JoinHandle<()>>,
}

impl TurnSession {
    /// Start watching `player_id` in `game_id`. `events` must be a fresh
    /// subscription to the game's channel.
    pub async fn start(
        service: Arc<GameFlowService>,
        game_id: Uuid,
        player_id: PlayerId,
        events: broadcast::Receiver<GameEvent>,
    ) -> Result<Self, AppError> {
        let limit = service.config().turn_timer_limit;
        let view = service.load_view(game_id, &player_id).await?;
        let inputs = TurnInputs::for_view(game_id, &view, limit);
        let latest = Arc::new(Mutex::new(inputs.clone()));

        let on_timeout = {
            let service = Arc::clone(&service);
            let player_id = player_id.clone();
            let latest = Arc::clone(&latest);
            timeout_callback(move || {
                let service = Arc::clone(&service);
                let player_id = player_id.clone();
                let turn = latest.lock().token();
                async move {
                    service
                        .submit_timeout_move(
                            game_id,
                            &player_id,
                            turn.current_player_index,
                            turn.turn_epoch,
                        )
                        .await
                }
            })
        };

        let controller = Arc::new(TurnTimeoutController::with_debounce(
            inputs,
            service.config().retry_debounce,
            on_timeout,
        ));
        let cancel = CancellationToken::new();
        let follower = tokio::spawn(follow(
            service,
            game_id,
            player_id,
            events,
            Arc::clone(&controller),
            latest,
            cancel.clone(),
        ));

        Ok(Self {
            controller,
            cancel,
            follower: Some(follower),
        })
    }

    pub fn phase(&self) -> TimeoutPhase {
        self.controller.phase()
    }

    /// Stop following the game and tear the watchdog down.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(follower) = self.follower.take() {
            if let Err(err) = follower.await {
                warn!(error = %err, "Turn session follower ended abnormally");
            }
        }
    }
}

impl Drop for TurnSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn follow(
    service: Arc<GameFlowService>,
    game_id: Uuid,
    player_id: PlayerId,
    mut events: broadcast::Receiver<GameEvent>,
    controller: Arc<TurnTimeoutController>,
    latest: Arc<Mutex<TurnInputs>>,
    cancel: CancellationToken,
) {
    let limit = service.config().turn_timer_limit;
    let push = |inputs: TurnInputs| {
        *latest.lock() = inputs.clone();
        controller.update(inputs);
    };

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events.recv() => event,
        };

        match event {
            Ok(GameEvent::StateChanged {
                game_id: event_game,
                status,
                current_player_index,
                turn_epoch,
                to_act,
                ..
            }) if event_game == game_id => {
                push(TurnInputs {
                    game_id,
                    is_my_turn: to_act.contains(&player_id),
                    current_player_index,
                    turn_epoch,
                    status,
                    turn_timer_limit: limit,
                });
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                debug!(%game_id, skipped, "Turn session lagged, reloading view");
                match service.load_view(game_id, &player_id).await {
                    Ok(view) => push(TurnInputs::for_view(game_id, &view, limit)),
                    Err(err) => warn!(%game_id, error = %err, "Failed to reload view"),
                }
            }
            Err(RecvError::Closed) => break,
        }
    }
}
