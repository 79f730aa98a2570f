//! Per-session turn timer with single-flight submission and cooldown retry.
//!
//! The controller owns one background task. Callers push fresh
//! [`TurnInputs`] whenever their view of the game changes; updates are
//! processed in order, never coalesced, so a turn that passes round the table
//! and back still opens a new episode. The task derives a [`TurnToken`] from
//! each update and walks the phases
//!
//! ```text
//! Idle -> Counting -> AttemptInFlight -> Settled
//!                         |      ^
//!                         v      |
//!                        Cooldown
//! ```
//!
//! Every attempt is tagged with the episode it was started in. A token
//! change opens a new episode, so results that arrive for an older one are
//! dropped without touching the current phase.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::engine::DEFAULT_RETRY_DEBOUNCE;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{GameStatus, Seat};
use crate::error::AppError;

/// Async timeout submission. Resolves `true` only when the move was durably
/// applied; `false` or an error schedules a retry after the debounce window.
pub type TimeoutCallback =
    Arc<dyn Fn() -> BoxFuture<'static, Result<bool, AppError>> + Send + Sync>;

/// Box an async closure into a [`TimeoutCallback`].
pub fn timeout_callback<F, Fut>(f: F) -> TimeoutCallback
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, AppError>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// The caller's latest view of the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInputs {
    pub game_id: Uuid,
    pub is_my_turn: bool,
    pub current_player_index: Seat,
    pub turn_epoch: u64,
    pub status: GameStatus,
    pub turn_timer_limit: Duration,
}

impl TurnInputs {
    /// Inputs for the seat behind `view`: it is "my turn" whenever the seat
    /// has something legal to submit.
    pub fn for_view(game_id: Uuid, view: &PlayerView, turn_timer_limit: Duration) -> Self {
        Self {
            game_id,
            is_my_turn: view.can_act(),
            current_player_index: view.current_player_index,
            turn_epoch: view.turn_epoch,
            status: view.status,
            turn_timer_limit,
        }
    }

    pub fn token(&self) -> TurnToken {
        TurnToken {
            game_id: self.game_id,
            current_player_index: self.current_player_index,
            turn_epoch: self.turn_epoch,
        }
    }

    fn is_live(&self) -> bool {
        self.is_my_turn && self.status == GameStatus::Playing
    }
}

/// Identifies one turn episode. The epoch separates episodes that keep the
/// same seat to act, such as a new round or phase opening at that seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnToken {
    pub game_id: Uuid,
    pub current_player_index: Seat,
    pub turn_epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    /// Not our turn, or the game is not being played.
    Idle,
    /// The turn budget runs out at `deadline`.
    Counting { deadline: Instant },
    /// `on_timeout` was called and has not resolved yet.
    AttemptInFlight,
    /// The last attempt failed; the next one may start at `retry_at`.
    Cooldown { retry_at: Instant },
    /// The last attempt succeeded; nothing more happens for this token.
    Settled,
}

impl TimeoutPhase {
    fn deadline(self) -> Option<Instant> {
        match self {
            TimeoutPhase::Counting { deadline } => Some(deadline),
            TimeoutPhase::Cooldown { retry_at } => Some(retry_at),
            _ => None,
        }
    }
}

/// Handle to a running watchdog. Dropping it stops the task and releases any
/// pending attempt.
pub struct TurnTimeoutController {
    inputs: mpsc::UnboundedSender<TurnInputs>,
    phase: watch::Receiver<TimeoutPhase>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TurnTimeoutController {
    /// Start watching with the default 1500 ms retry debounce.
    pub fn spawn(inputs: TurnInputs, on_timeout: TimeoutCallback) -> Self {
        Self::with_debounce(inputs, DEFAULT_RETRY_DEBOUNCE, on_timeout)
    }

    pub fn with_debounce(
        inputs: TurnInputs,
        retry_debounce: Duration,
        on_timeout: TimeoutCallback,
    ) -> Self {
        let token = inputs.token();
        let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();
        let (phase_tx, phase_rx) = watch::channel(TimeoutPhase::Idle);
        let cancel = CancellationToken::new();

        let watchdog = Watchdog {
            inputs: inputs_rx,
            phase_tx,
            on_timeout,
            retry_debounce,
            current: inputs,
            token,
            episode: 0,
            attempt: 0,
            phase: TimeoutPhase::Idle,
            attempts: FuturesUnordered::new(),
        };
        let task = tokio::spawn(watchdog.run(cancel.clone()));

        Self {
            inputs: inputs_tx,
            phase: phase_rx,
            cancel,
            task: Some(task),
        }
    }

    /// Push the caller's latest view.
    pub fn update(&self, inputs: TurnInputs) {
        if self.inputs.send(inputs).is_err() {
            debug!("Timeout watchdog already stopped, update dropped");
        }
    }

    /// Phase as last published by the watchdog task.
    pub fn phase(&self) -> TimeoutPhase {
        *self.phase.borrow()
    }

    /// Stop the watchdog and wait for it to release its timers and any
    /// in-flight attempt.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "Timeout watchdog task ended abnormally");
            }
        }
    }
}

impl Drop for TurnTimeoutController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

type Attempt = BoxFuture<'static, (u64, Result<bool, AppError>)>;

struct Watchdog {
    inputs: mpsc::UnboundedReceiver<TurnInputs>,
    phase_tx: watch::Sender<TimeoutPhase>,
    on_timeout: TimeoutCallback,
    retry_debounce: Duration,
    current: TurnInputs,
    token: TurnToken,
    /// Bumped on every token change; attempts carry the value they started in.
    episode: u64,
    /// Attempts made in the current episode.
    attempt: u32,
    phase: TimeoutPhase,
    attempts: FuturesUnordered<Attempt>,
}

impl Watchdog {
    async fn run(mut self, cancel: CancellationToken) {
        self.phase = self.fresh_phase(Instant::now());

        loop {
            self.phase_tx.send_replace(self.phase);
            let deadline = self.phase.deadline();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                next = self.inputs.recv() => {
                    let Some(next) = next else {
                        break;
                    };
                    self.on_inputs(next, Instant::now());
                }
                Some((episode, result)) = self.attempts.next(), if !self.attempts.is_empty() => {
                    self.on_result(episode, result, Instant::now());
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_deadline();
                }
            }
        }

        debug!(
            game_id = %self.token.game_id,
            pending = self.attempts.len(),
            "Timeout watchdog stopped"
        );
    }

    fn fresh_phase(&self, now: Instant) -> TimeoutPhase {
        if self.current.is_live() {
            TimeoutPhase::Counting {
                deadline: now + self.current.turn_timer_limit,
            }
        } else {
            TimeoutPhase::Idle
        }
    }

    fn on_inputs(&mut self, next: TurnInputs, now: Instant) {
        let token = next.token();
        self.current = next;

        if token != self.token {
            debug!(
                game_id = %token.game_id,
                from_seat = self.token.current_player_index,
                to_seat = token.current_player_index,
                turn_epoch = token.turn_epoch,
                "Turn changed, resetting timer"
            );
            self.token = token;
            self.episode += 1;
            self.attempt = 0;
            self.phase = self.fresh_phase(now);
            return;
        }

        let live = self.current.is_live();
        self.phase = match self.phase {
            TimeoutPhase::Counting { .. } if !live => TimeoutPhase::Idle,
            TimeoutPhase::Idle if live => self.fresh_phase(now),
            // in-flight, cooldown and settled outlive input flicker
            other => other,
        };
    }

    fn on_deadline(&mut self) {
        match self.phase {
            TimeoutPhase::Counting { .. } => self.fire(),
            TimeoutPhase::Cooldown { .. } if self.current.is_live() => self.fire(),
            TimeoutPhase::Cooldown { .. } => self.phase = TimeoutPhase::Idle,
            _ => {}
        }
    }

    fn fire(&mut self) {
        self.attempt += 1;
        info!(
            game_id = %self.token.game_id,
            seat = self.token.current_player_index,
            attempt = self.attempt,
            "Turn timer expired, submitting timeout move"
        );
        let episode = self.episode;
        let attempt = (self.on_timeout)().map(move |result| (episode, result));
        self.attempts.push(attempt.boxed());
        self.phase = TimeoutPhase::AttemptInFlight;
    }

    fn on_result(&mut self, episode: u64, result: Result<bool, AppError>, now: Instant) {
        if episode != self.episode || self.phase != TimeoutPhase::AttemptInFlight {
            debug!(
                game_id = %self.token.game_id,
                episode,
                current_episode = self.episode,
                applied = matches!(result, Ok(true)),
                "Discarding stale timeout result"
            );
            return;
        }

        let retry_at = now + self.retry_debounce;
        let retry_delay_ms = self.retry_debounce.as_millis() as u64;
        self.phase = match result {
            Ok(true) => {
                info!(
                    game_id = %self.token.game_id,
                    seat = self.token.current_player_index,
                    attempt = self.attempt,
                    "Timeout move applied"
                );
                TimeoutPhase::Settled
            }
            Ok(false) => {
                warn!(
                    game_id = %self.token.game_id,
                    attempt = self.attempt,
                    retry_delay_ms,
                    "Timeout move not applied, will retry"
                );
                TimeoutPhase::Cooldown { retry_at }
            }
            Err(err) => {
                warn!(
                    game_id = %self.token.game_id,
                    error = %err,
                    attempt = self.attempt,
                    retry_delay_ms,
                    "Timeout submission failed, will retry"
                );
                TimeoutPhase::Cooldown { retry_at }
            }
        };
    }
}
