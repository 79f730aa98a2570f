//! Heuristic: the medium bot.
//!
//! Goals:
//! - Stay 100% legal by only ever returning one of `view.legal_actions()`.
//! - Be noticeably better than random with one-ply reasoning only.
//!
//! Three-in-a-row:
//! - Complete a line if possible, else block the opponent's line, else random.
//!
//! Rock/paper/scissors:
//! - Half of the time, counter the opponents' most recent choice; otherwise random.
//!
//! Deduction:
//! - Ask the seat that has been questioned least this round (lowest seat on ties).
//! - Vote with the current plurality when one suspect leads outright; otherwise random.
//!
//! With no history to read, every branch falls back to random.

use std::collections::BTreeMap;

use super::random::RandomPlayer;
use super::trait_def::{AiError, BotPlayer};
use crate::domain::moves::MoveAction;
use crate::domain::player_view::{DeductionView, PlayerView, RpsView, ViewData};
use crate::domain::rock_paper_scissors::RpsPhase;
use crate::domain::state::PlayerId;
use crate::domain::tic_tac_toe::{Mark, TicTacToeData, CELLS, LINES};

/// Probability that the medium bot counters instead of playing randomly.
pub const COUNTER_PROBABILITY: f64 = 0.5;

pub struct Heuristic {
    random: RandomPlayer,
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: RandomPlayer::new(seed),
        }
    }

    fn rps_choice(&self, view: &PlayerView, rps: &RpsView) -> Result<Option<MoveAction>, AiError> {
        if rps.phase != RpsPhase::Choosing {
            return Ok(None);
        }
        let Some(last) = rps.opponent_choices(&view.viewer).last() else {
            return Ok(None);
        };
        if !self.random.chance(COUNTER_PROBABILITY)? {
            return Ok(None);
        }
        Ok(Some(MoveAction::Choose {
            choice: last.counter(),
        }))
    }
}

impl BotPlayer for Heuristic {
    fn choose_action(&self, view: &PlayerView) -> Result<MoveAction, AiError> {
        let legal = view.legal_actions();
        if legal.len() <= 1 {
            return self.random.choose_action(view);
        }

        let preferred = match &view.data {
            ViewData::TicTacToe(board) => win_or_block(board),
            ViewData::RockPaperScissors(rps) => self.rps_choice(view, rps)?,
            ViewData::Deduction(d) => least_asked_target(view, d, legal)
                .or_else(|| plurality_vote(d, legal)),
        };

        match preferred {
            Some(action) if legal.contains(&action) => Ok(action),
            _ => self.random.pick(legal),
        }
    }
}

/// Empty cell that would complete a line of `mark`, first line order.
pub fn completing_cell(board: &[Option<Mark>; CELLS], mark: Mark) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&c| board[c] == Some(mark)).count();
        let empty = line.iter().copied().find(|&c| board[c].is_none());
        match (owned, empty) {
            (2, Some(cell)) => Some(cell),
            _ => None,
        }
    })
}

fn win_or_block(data: &TicTacToeData) -> Option<MoveAction> {
    let me = data.active_mark;
    completing_cell(&data.board, me)
        .or_else(|| completing_cell(&data.board, me.other()))
        .map(|cell| MoveAction::Place { cell })
}

/// Least-questioned legal target, lowest seat first.
pub fn least_asked_target(
    view: &PlayerView,
    d: &DeductionView,
    legal: &[MoveAction],
) -> Option<MoveAction> {
    legal
        .iter()
        .filter_map(|a| match a {
            MoveAction::Ask { target } => Some(target),
            _ => None,
        })
        .min_by_key(|target| (d.times_asked(target), view.seat_of(target)))
        .map(|target| MoveAction::Ask {
            target: target.clone(),
        })
}

/// Ballots per suspect in the open vote.
pub fn vote_counts(d: &DeductionView) -> BTreeMap<&PlayerId, usize> {
    let mut counts = BTreeMap::new();
    for suspect in d.votes.values() {
        *counts.entry(suspect).or_insert(0) += 1;
    }
    counts
}

/// Join an outright leader, if there is one and we may accuse them.
fn plurality_vote(d: &DeductionView, legal: &[MoveAction]) -> Option<MoveAction> {
    let counts = vote_counts(d);
    let top = counts.values().copied().max()?;
    let mut leaders = counts.iter().filter(|(_, c)| **c == top);
    let leader = match (leaders.next(), leaders.next()) {
        (Some((id, _)), None) => (*id).clone(),
        _ => return None,
    };
    let vote = MoveAction::Vote { suspect: leader };
    legal.contains(&vote).then_some(vote)
}
