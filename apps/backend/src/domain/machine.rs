//! The per-game state machine.
//!
//! A `GameMachine` is rehydrated from a persisted snapshot for every request,
//! mutated by exactly one writer, and handed back as a snapshot. Variant rules
//! live in their own modules; this type owns the lifecycle (`waiting` →
//! `playing` → `finished`) and dispatches on the closed [`GameData`] enum.

use tracing::{debug, trace};

use crate::domain::deduction::{self, DeductionData};
use crate::domain::moves::{Move, MoveAction};
use crate::domain::rock_paper_scissors::{self, RpsData};
use crate::domain::rules::Transition;
use crate::domain::settings::GameSettings;
use crate::domain::state::{GameData, GameState, GameStatus, GameType, PlayerSeat, Seat};
use crate::domain::tic_tac_toe::{self, TicTacToeData};
use crate::errors::domain::{DomainError, InfraErrorKind, InvalidStateKind, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMachine {
    state: GameState,
}

impl GameMachine {
    /// Empty lobby for `game_type`.
    pub fn new(game_type: GameType, settings: &GameSettings) -> Self {
        let data = match game_type {
            GameType::TicTacToe => GameData::TicTacToe(TicTacToeData::default()),
            GameType::RockPaperScissors => {
                GameData::RockPaperScissors(RpsData::new(settings.target_score()))
            }
            GameType::Deduction => {
                let seed = settings.seed.unwrap_or_else(rand::random);
                GameData::Deduction(DeductionData::new(seed, settings.rounds()))
            }
        };
        Self {
            state: GameState {
                status: GameStatus::Waiting,
                current_player_index: 0,
                turn_epoch: 0,
                players: Vec::new(),
                data,
            },
        }
    }

    /// Rehydrate from a snapshot.
    pub fn from_state(state: GameState) -> Result<Self, DomainError> {
        check_snapshot(&state)?;
        Ok(Self { state })
    }

    /// Rehydrate from a persisted JSON blob.
    pub fn from_blob(blob: &str) -> Result<Self, DomainError> {
        let state: GameState = serde_json::from_str(blob).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Serialization,
                format!("malformed game blob: {e}"),
            )
        })?;
        Self::from_state(state)
    }

    /// Serialize the current snapshot.
    pub fn to_blob(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.state).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Serialization,
                format!("cannot serialize game state: {e}"),
            )
        })
    }

    pub fn game_type(&self) -> GameType {
        self.state.game_type()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn get_state(&self) -> GameState {
        self.state.clone()
    }

    /// Replace the snapshot wholesale.
    pub fn restore_state(&mut self, state: GameState) -> Result<(), DomainError> {
        check_snapshot(&state)?;
        self.state = state;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn add_player(&mut self, player: PlayerSeat) -> Result<(), DomainError> {
        if self.state.status != GameStatus::Waiting {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AlreadyStarted,
                "players can only join while the game is waiting",
            ));
        }
        let (_, max) = self.game_type().player_range();
        if self.state.players.len() >= max {
            return Err(DomainError::invalid_state(
                InvalidStateKind::PlayerLimitReached,
                format!("{} seats at most {max} players", self.game_type()),
            ));
        }
        if self.state.seat_of(&player.id).is_some() {
            return Err(DomainError::invalid_state(
                InvalidStateKind::DuplicatePlayer,
                format!("{} is already seated", player.id),
            ));
        }
        debug!(player_id = %player.id, is_bot = player.is_bot, seat = self.state.players.len(), "Player seated");
        self.state.players.push(player);
        Ok(())
    }

    pub fn start_game(&mut self) -> Result<(), DomainError> {
        if self.state.status != GameStatus::Waiting {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AlreadyStarted,
                "game has already started",
            ));
        }
        let (min, max) = self.game_type().player_range();
        let count = self.state.players.len();
        if count < min || count > max {
            return Err(DomainError::invalid_state(
                InvalidStateKind::PlayerCountOutOfRange,
                format!("{} needs {min}..={max} players, has {count}", self.game_type()),
            ));
        }

        let players = &self.state.players;
        let first = match &mut self.state.data {
            GameData::TicTacToe(data) => tic_tac_toe::start(data),
            GameData::RockPaperScissors(data) => rock_paper_scissors::start(data, players),
            GameData::Deduction(data) => deduction::start(data, players),
        };
        self.state.current_player_index = first;
        self.state.turn_epoch += 1;
        self.state.status = GameStatus::Playing;
        debug!(game_type = %self.game_type(), players = count, first_seat = first, "Game started");
        Ok(())
    }

    /// Pure legality predicate; never panics.
    pub fn validate_move(&self, mv: &Move) -> bool {
        match self.check_move(mv) {
            Ok(()) => true,
            Err(err) => {
                trace!(player_id = %mv.player_id(), move_type = mv.type_tag(), error = %err, "Move rejected");
                false
            }
        }
    }

    /// Same as [`validate_move`](Self::validate_move) but explains the rejection.
    pub fn check_move(&self, mv: &Move) -> Result<(), DomainError> {
        if self.state.status != GameStatus::Playing {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("game is {:?}", self.state.status),
            ));
        }
        let seat = self.state.seat_of(mv.player_id()).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("{} is not seated in this game", mv.player_id()),
            )
        })?;
        let current = self.state.current_player_index;
        let players = &self.state.players;
        match &self.state.data {
            GameData::TicTacToe(data) => tic_tac_toe::check(data, current, seat, mv.action()),
            GameData::RockPaperScissors(data) => {
                rock_paper_scissors::check(data, mv.player_id(), mv.action())
            }
            GameData::Deduction(data) => {
                deduction::check(data, players, current, seat, mv.action())
            }
        }
    }

    /// Apply a move. Illegal moves are refused without touching state.
    pub fn process_move(&mut self, mv: &Move) -> Result<(), DomainError> {
        self.check_move(mv)?;
        let seat = self
            .state
            .seat_of(mv.player_id())
            .ok_or_else(|| DomainError::illegal_move("mover vanished between check and apply"))?;
        let current = self.state.current_player_index;
        let players = &self.state.players;

        let transition: Transition = match &mut self.state.data {
            GameData::TicTacToe(data) => tic_tac_toe::apply(data, players, current, mv.action()),
            GameData::RockPaperScissors(data) => {
                rock_paper_scissors::apply(data, players, current, mv.player_id(), mv.action())
            }
            GameData::Deduction(data) => {
                deduction::apply(data, players, current, seat, mv.action())
            }
        };

        if transition.next_seat != current || transition.new_phase {
            self.state.turn_epoch += 1;
        }
        self.state.current_player_index = transition.next_seat;
        if transition.finished {
            self.state.status = GameStatus::Finished;
            debug!(game_type = %self.game_type(), "Game finished");
        }
        trace!(
            player_id = %mv.player_id(),
            move_type = mv.type_tag(),
            next_seat = transition.next_seat,
            turn_epoch = self.state.turn_epoch,
            "Move applied"
        );
        Ok(())
    }

    /// Seats that may submit a move right now.
    ///
    /// Sequential phases yield the current seat; simultaneous phases yield
    /// every seat still owing a choice.
    pub fn seats_to_act(&self) -> Vec<Seat> {
        if self.state.status != GameStatus::Playing {
            return Vec::new();
        }
        let current = self.state.current_player_index;
        let players = &self.state.players;
        match &self.state.data {
            GameData::TicTacToe(data) => tic_tac_toe::actors(data, current),
            GameData::RockPaperScissors(data) => rock_paper_scissors::actors(data, players),
            GameData::Deduction(data) => deduction::actors(data, players, current),
        }
    }

    /// Every legal action for `seat`; empty when it may not act.
    pub fn legal_actions(&self, seat: Seat) -> Vec<MoveAction> {
        if self.state.status != GameStatus::Playing || seat >= self.state.players.len() {
            return Vec::new();
        }
        let current = self.state.current_player_index;
        let players = &self.state.players;
        match &self.state.data {
            GameData::TicTacToe(data) => tic_tac_toe::legal_actions(data, current, seat),
            GameData::RockPaperScissors(data) => {
                rock_paper_scissors::legal_actions(data, &players[seat].id)
            }
            GameData::Deduction(data) => deduction::legal_actions(data, players, current, seat),
        }
    }
}

/// Structural invariants a restored snapshot must satisfy.
fn check_snapshot(state: &GameState) -> Result<(), DomainError> {
    if state.status == GameStatus::Playing && state.current_player_index >= state.players.len() {
        return Err(DomainError::invalid_state(
            InvalidStateKind::CorruptSnapshot,
            format!(
                "current player index {} is out of bounds for {} players",
                state.current_player_index,
                state.players.len()
            ),
        ));
    }
    let (_, max) = state.game_type().player_range();
    if state.players.len() > max {
        return Err(DomainError::invalid_state(
            InvalidStateKind::CorruptSnapshot,
            format!("{} players exceed the {} limit", state.players.len(), max),
        ));
    }
    if let GameData::TicTacToe(board) = &state.data {
        if let Some(fault) = tic_tac_toe::snapshot_fault(board) {
            return Err(DomainError::invalid_state(
                InvalidStateKind::CorruptSnapshot,
                fault,
            ));
        }
    }
    Ok(())
}
