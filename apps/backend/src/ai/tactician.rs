//! Tactician: the hard bot.
//!
//! - **Three-in-a-row**: exhaustive negamax search with alpha-beta pruning.
//!   Wins score higher the sooner they happen, so the bot closes games out
//!   and drags losses out as long as possible.
//! - **Rock/paper/scissors**: counter the opponents' most frequent choice over
//!   the whole tournament. Frequency ties go to the tied choice seen most
//!   recently.
//! - **Deduction**: questions like the medium bot, but votes with the
//!   bandwagon: the suspect with the most ballots so far, lowest seat first
//!   when tied (including before anyone has voted).

use super::heuristic::{least_asked_target, vote_counts};
use super::random::RandomPlayer;
use super::trait_def::{AiError, BotPlayer};
use crate::domain::moves::MoveAction;
use crate::domain::player_view::{DeductionView, PlayerView, RpsView, ViewData};
use crate::domain::rock_paper_scissors::{Choice, RpsPhase};
use crate::domain::tic_tac_toe::{winning_line, Mark, TicTacToeData, CELLS};

const WIN_SCORE: i32 = 10;
const INFINITY: i32 = 1_000;

pub struct Tactician {
    random: RandomPlayer,
}

impl Tactician {
    pub const NAME: &'static str = "Tactician";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: RandomPlayer::new(seed),
        }
    }
}

impl BotPlayer for Tactician {
    fn choose_action(&self, view: &PlayerView) -> Result<MoveAction, AiError> {
        let legal = view.legal_actions();
        if legal.len() <= 1 {
            return self.random.choose_action(view);
        }

        let preferred = match &view.data {
            ViewData::TicTacToe(board) => best_cell(board).map(|cell| MoveAction::Place { cell }),
            ViewData::RockPaperScissors(rps) => counter_most_frequent(view, rps),
            ViewData::Deduction(d) => {
                least_asked_target(view, d, legal).or_else(|| bandwagon_vote(view, d, legal))
            }
        };

        match preferred {
            Some(action) if legal.contains(&action) => Ok(action),
            _ => self.random.pick(legal),
        }
    }
}

/// Best cell for the side to move; lowest cell index among equal scores.
pub fn best_cell(data: &TicTacToeData) -> Option<usize> {
    let me = data.active_mark;
    let mut board = data.board;
    let mut best: Option<(i32, usize)> = None;
    for cell in 0..CELLS {
        if board[cell].is_some() {
            continue;
        }
        board[cell] = Some(me);
        let score = -negamax(&mut board, me.other(), 1, -INFINITY, INFINITY);
        board[cell] = None;
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// Score of `board` for `to_move`, `depth` plies below the root.
fn negamax(
    board: &mut [Option<Mark>; CELLS],
    to_move: Mark,
    depth: i32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    if winning_line(board).is_some() {
        // the previous mover completed a line
        return depth - WIN_SCORE;
    }
    if board.iter().all(Option::is_some) {
        return 0;
    }

    let mut best = -INFINITY;
    for cell in 0..CELLS {
        if board[cell].is_some() {
            continue;
        }
        board[cell] = Some(to_move);
        let score = -negamax(board, to_move.other(), depth + 1, -beta, -alpha);
        board[cell] = None;

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Most frequent opponent choice, most recent among equals.
pub fn predicted_choice(view: &PlayerView, rps: &RpsView) -> Option<Choice> {
    // choice -> (count, last position seen)
    let mut stats: [(usize, usize); 3] = [(0, 0); 3];
    let mut seen_any = false;
    for (pos, choice) in rps.opponent_choices(&view.viewer).enumerate() {
        let slot = &mut stats[choice_index(choice)];
        slot.0 += 1;
        slot.1 = pos;
        seen_any = true;
    }
    if !seen_any {
        return None;
    }
    Choice::ALL
        .into_iter()
        .filter(|c| stats[choice_index(*c)].0 > 0)
        .max_by_key(|c| stats[choice_index(*c)])
}

fn choice_index(choice: Choice) -> usize {
    match choice {
        Choice::Rock => 0,
        Choice::Paper => 1,
        Choice::Scissors => 2,
    }
}

fn counter_most_frequent(view: &PlayerView, rps: &RpsView) -> Option<MoveAction> {
    if rps.phase != RpsPhase::Choosing {
        return None;
    }
    predicted_choice(view, rps).map(|predicted| MoveAction::Choose {
        choice: predicted.counter(),
    })
}

/// Most-accused legal suspect; lowest seat breaks ties.
fn bandwagon_vote(view: &PlayerView, d: &DeductionView, legal: &[MoveAction]) -> Option<MoveAction> {
    let counts = vote_counts(d);
    legal
        .iter()
        .filter_map(|a| match a {
            MoveAction::Vote { suspect } => Some(suspect),
            _ => None,
        })
        .max_by_key(|suspect| {
            let ballots = counts.get(suspect).copied().unwrap_or(0);
            let seat = view.seat_of(suspect).unwrap_or(usize::MAX);
            (ballots, std::cmp::Reverse(seat))
        })
        .map(|suspect| MoveAction::Vote {
            suspect: suspect.clone(),
        })
}
