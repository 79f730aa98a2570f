//! Three-in-a-row on a 3×3 board.
//!
//! Seat 0 plays X and always opens; seats alternate strictly. A game ends on
//! the first completed line or when the ninth mark fills the board.

use serde::{Deserialize, Serialize};

use crate::domain::moves::MoveAction;
use crate::domain::rules::{ensure, unknown_move, Transition};
use crate::domain::state::{next_seat, PlayerSeat, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

pub const CELLS: usize = 9;

/// Every winning line, row-major cell indices.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub const fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Mark owned by a seat: seat 0 is X.
    pub const fn for_seat(seat: Seat) -> Mark {
        if seat % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
}

/// Final board result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardOutcome {
    Won(Mark),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicTacToeData {
    pub board: [Option<Mark>; CELLS],
    pub active_mark: Mark,
    pub move_count: u8,
    pub winner: Option<BoardOutcome>,
    pub winning_line: Option<[usize; 3]>,
}

impl Default for TicTacToeData {
    fn default() -> Self {
        Self {
            board: [None; CELLS],
            active_mark: Mark::X,
            move_count: 0,
            winner: None,
            winning_line: None,
        }
    }
}

impl TicTacToeData {
    /// Cell at (row, col); `None` when out of range or empty.
    pub fn at(&self, row: usize, col: usize) -> Option<Mark> {
        if row < 3 && col < 3 {
            self.board[row * 3 + col]
        } else {
            None
        }
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&c| self.board[c].is_none()).collect()
    }
}

/// Why a restored board cannot have been produced by legal play, if it can't.
pub fn snapshot_fault(data: &TicTacToeData) -> Option<String> {
    let count = |mark| data.board.iter().filter(|c| **c == Some(mark)).count();
    let (xs, os) = (count(Mark::X), count(Mark::O));
    if usize::from(data.move_count) != xs + os {
        return Some(format!(
            "move count {} disagrees with {} marks on the board",
            data.move_count,
            xs + os
        ));
    }
    if xs != os && xs != os + 1 {
        return Some(format!("{xs} X marks against {os} O marks"));
    }
    None
}

/// Reset the board; X (seat 0) moves first.
pub fn start(data: &mut TicTacToeData) -> Seat {
    *data = TicTacToeData::default();
    0
}

/// Seats that may act right now.
pub fn actors(data: &TicTacToeData, current: Seat) -> Vec<Seat> {
    if data.winner.is_some() {
        Vec::new()
    } else {
        vec![current]
    }
}

pub fn check(
    data: &TicTacToeData,
    current: Seat,
    seat: Seat,
    action: &MoveAction,
) -> Result<(), DomainError> {
    let MoveAction::Place { cell } = action else {
        return Err(unknown_move("tic_tac_toe", action.type_tag()));
    };
    ensure(data.winner.is_none(), ValidationKind::PhaseMismatch, || {
        "board is already decided".into()
    })?;
    ensure(seat == current, ValidationKind::OutOfTurn, || {
        format!("seat {seat} moved but seat {current} is to act")
    })?;
    ensure(*cell < CELLS, ValidationKind::IllegalMove, || {
        format!("cell {cell} is off the board")
    })?;
    ensure(data.board[*cell].is_none(), ValidationKind::IllegalMove, || {
        format!("cell {cell} is already occupied")
    })
}

/// Apply a checked placement.
pub fn apply(
    data: &mut TicTacToeData,
    players: &[PlayerSeat],
    current: Seat,
    action: &MoveAction,
) -> Transition {
    let MoveAction::Place { cell } = action else {
        return Transition::continue_with(current);
    };
    let mark = data.active_mark;
    data.board[*cell] = Some(mark);
    data.move_count += 1;

    if let Some(line) = winning_line(&data.board) {
        data.winner = Some(BoardOutcome::Won(mark));
        data.winning_line = Some(line);
        return Transition::finish(current);
    }
    if data.move_count as usize == CELLS {
        data.winner = Some(BoardOutcome::Draw);
        return Transition::finish(current);
    }

    data.active_mark = mark.other();
    Transition::continue_with(next_seat(current, players.len()))
}

/// First complete line on the board, if any.
pub fn winning_line(board: &[Option<Mark>; CELLS]) -> Option<[usize; 3]> {
    LINES.into_iter().find(|line| {
        let [a, b, c] = *line;
        board[a].is_some() && board[a] == board[b] && board[b] == board[c]
    })
}

pub fn legal_actions(data: &TicTacToeData, current: Seat, seat: Seat) -> Vec<MoveAction> {
    if data.winner.is_some() || seat != current {
        return Vec::new();
    }
    data.empty_cells()
        .into_iter()
        .map(|cell| MoveAction::Place { cell })
        .collect()
}
