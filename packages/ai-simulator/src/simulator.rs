//! In-memory bot-vs-bot game runner.
//!
//! Every game goes through the real game flow service backed by an
//! in-memory store, so the simulator exercises exactly the code path a
//! deployed driver would.

use std::sync::Arc;
use std::time::Instant;

use gamehall::domain::tic_tac_toe::{BoardOutcome, Mark};
use gamehall::domain::{GameData, GameSettings, GameState, GameStatus, GameType, PlayerId, Seat};
use gamehall::services::game_flow::{ChannelBroadcaster, GameFlowService, MemoryGameStore};
use gamehall::{AppError, Difficulty, EngineConfig};
use serde::Serialize;
use tracing::debug;

/// Bot actions allowed per game before the run is declared stuck.
const MAX_BOT_ACTIONS: usize = 100_000;

/// Outcome of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game_no: u32,
    pub seed: u64,
    /// `None` on a draw or a shared top score.
    pub winner_seat: Option<Seat>,
    pub scores: Vec<u32>,
    pub bot_actions: usize,
    pub duration_ms: f64,
}

pub struct Simulator {
    service: GameFlowService,
    game_type: GameType,
    seats: Vec<Difficulty>,
}

impl Simulator {
    pub fn new(game_type: GameType, seats: Vec<Difficulty>) -> Self {
        let config = EngineConfig {
            max_bot_actions: MAX_BOT_ACTIONS,
            ..EngineConfig::default()
        };
        let service = GameFlowService::new(
            Arc::new(MemoryGameStore::new()),
            Arc::new(ChannelBroadcaster::new()),
            config,
        );
        Self {
            service,
            game_type,
            seats,
        }
    }

    /// Seat one bot per configured difficulty and let them play it out.
    pub async fn simulate_game(&self, game_no: u32, seed: u64) -> Result<GameResult, AppError> {
        let started = Instant::now();
        let game_id = self
            .service
            .create_game(self.game_type, GameSettings::with_seed(seed))
            .await?;

        for (seat, difficulty) in self.seats.iter().enumerate() {
            self.service
                .add_bot(
                    game_id,
                    format!("seat{seat}"),
                    format!("{difficulty} bot {seat}"),
                    *difficulty,
                )
                .await?;
        }

        let result = self.service.start_game(game_id).await?;
        if result.status != GameStatus::Finished {
            return Err(AppError::internal(format!(
                "game {game_no} stopped after {} bot actions without finishing",
                result.bot_actions
            )));
        }

        let (state, _) = self.service.load_state(game_id).await?;
        let (winner_seat, scores) = outcome(&state);
        debug!(game_no, seed, ?winner_seat, bot_actions = result.bot_actions, "Game simulated");

        Ok(GameResult {
            game_no,
            seed,
            winner_seat,
            scores,
            bot_actions: result.bot_actions,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// Winning seat and per-seat score of a finished game.
fn outcome(state: &GameState) -> (Option<Seat>, Vec<u32>) {
    let seat_of = |id: &PlayerId| state.seat_of(id);
    let per_seat = |scores: &std::collections::BTreeMap<PlayerId, u32>| -> Vec<u32> {
        state
            .players
            .iter()
            .map(|p| scores.get(&p.id).copied().unwrap_or(0))
            .collect()
    };

    match &state.data {
        GameData::TicTacToe(board) => match board.winner {
            Some(BoardOutcome::Won(Mark::X)) => (Some(0), vec![1, 0]),
            Some(BoardOutcome::Won(Mark::O)) => (Some(1), vec![0, 1]),
            _ => (None, vec![0, 0]),
        },
        GameData::RockPaperScissors(rps) => {
            (rps.winner.as_ref().and_then(seat_of), per_seat(&rps.scores))
        }
        GameData::Deduction(d) => (d.winner.as_ref().and_then(seat_of), per_seat(&d.scores)),
    }
}
