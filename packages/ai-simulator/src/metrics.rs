//! Aggregate statistics over simulated games.

use gamehall::domain::GameType;
use gamehall::Difficulty;
use serde::Serialize;

use crate::simulator::GameResult;

#[derive(Debug, Clone, Serialize)]
pub struct SeatSummary {
    pub seat: usize,
    pub difficulty: Difficulty,
    pub wins: u32,
    pub win_pct: f64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub game: GameType,
    pub games: u32,
    pub completed: usize,
    pub errors: u32,
    /// Games without a single winner.
    pub draws: u32,
    pub avg_bot_actions: f64,
    pub elapsed_ms: f64,
    pub seats: Vec<SeatSummary>,
}

pub fn summarize(
    game: GameType,
    seats: &[Difficulty],
    games: u32,
    results: &[GameResult],
    errors: u32,
    elapsed_ms: f64,
) -> Summary {
    let completed = results.len();
    let per_game = |total: f64| {
        if completed == 0 {
            0.0
        } else {
            total / completed as f64
        }
    };

    let mut wins = vec![0u32; seats.len()];
    let mut totals = vec![0u64; seats.len()];
    let mut draws = 0;
    let mut actions = 0usize;

    for result in results {
        match result.winner_seat {
            Some(seat) if seat < wins.len() => wins[seat] += 1,
            _ => draws += 1,
        }
        for (seat, score) in result.scores.iter().enumerate().take(seats.len()) {
            totals[seat] += u64::from(*score);
        }
        actions += result.bot_actions;
    }

    let seats = seats
        .iter()
        .enumerate()
        .map(|(seat, difficulty)| SeatSummary {
            seat,
            difficulty: *difficulty,
            wins: wins[seat],
            win_pct: per_game(f64::from(wins[seat]) * 100.0),
            avg_score: per_game(totals[seat] as f64),
        })
        .collect();

    Summary {
        game,
        games,
        completed,
        errors,
        draws,
        avg_bot_actions: per_game(actions as f64),
        elapsed_ms,
        seats,
    }
}
