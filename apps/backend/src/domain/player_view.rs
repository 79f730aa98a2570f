//! Player view of game state: what one seat is allowed to see.
//!
//! This is the interface between the engine and anything acting on behalf of
//! a seat. Bots decide from it and the driver layer hands it to clients, so
//! secrets never leave the machine unredacted:
//!
//! - rock/paper/scissors: other players' pending choices stay hidden until
//!   the round resolves (only *who* has chosen is visible);
//! - deduction: the spy learns its role but not the location, civilians
//!   learn the location but not the spy. Everything is revealed once the
//!   game is finished.
//!
//! [`PlayerView::legal_actions`] lists every move the viewer may submit right
//! now. Always use it instead of re-implementing rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::deduction::{DeductionData, DeductionPhase, DeductionRoundResult, Question};
use crate::domain::machine::GameMachine;
use crate::domain::moves::MoveAction;
use crate::domain::rock_paper_scissors::{Choice, RpsData, RpsPhase, RpsRound};
use crate::domain::state::{GameData, GameStatus, GameType, PlayerId, PlayerSeat, Seat};
use crate::domain::tic_tac_toe::TicTacToeData;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Everything visible to one seat at a decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub seat: Seat,
    pub game_type: GameType,
    pub status: GameStatus,
    pub current_player_index: Seat,
    pub turn_epoch: u64,
    pub players: Vec<PlayerSeat>,
    pub data: ViewData,
    legal_actions: Vec<MoveAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "state", rename_all = "snake_case")]
pub enum ViewData {
    /// Nothing on the board is secret.
    TicTacToe(TicTacToeData),
    RockPaperScissors(RpsView),
    Deduction(DeductionView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpsView {
    pub target_score: u32,
    pub phase: RpsPhase,
    pub rounds: Vec<RpsRound>,
    pub ready: BTreeSet<PlayerId>,
    /// Players who have locked in a choice this round.
    pub chosen: BTreeSet<PlayerId>,
    pub my_choice: Option<Choice>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub winner: Option<PlayerId>,
}

impl RpsView {
    fn redact(data: &RpsData, viewer: &PlayerId) -> Self {
        Self {
            target_score: data.target_score,
            phase: data.phase,
            rounds: data.rounds.clone(),
            ready: data.ready.clone(),
            chosen: data.pending.keys().cloned().collect(),
            my_choice: data.pending.get(viewer).copied(),
            scores: data.scores.clone(),
            winner: data.winner.clone(),
        }
    }

    /// Choices made by everyone but `viewer`, oldest round first.
    pub fn opponent_choices<'a>(
        &'a self,
        viewer: &'a PlayerId,
    ) -> impl Iterator<Item = Choice> + 'a {
        self.rounds.iter().flat_map(move |round| {
            round
                .choices
                .iter()
                .filter(move |(id, _)| *id != viewer)
                .map(|(_, c)| *c)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionView {
    pub total_rounds: u32,
    pub round: u32,
    pub phase: DeductionPhase,
    pub is_spy: bool,
    /// Known to civilians; `None` for the spy while the game runs.
    pub location: Option<String>,
    /// Revealed only after the game is finished.
    pub spy: Option<PlayerId>,
    pub first_asker: Seat,
    pub questions: Vec<Question>,
    /// Who has voted this round. Ballots stay open, as in the table game.
    pub votes: BTreeMap<PlayerId, PlayerId>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub history: Vec<DeductionRoundResult>,
    pub winner: Option<PlayerId>,
}

impl DeductionView {
    fn redact(data: &DeductionData, viewer: &PlayerId, finished: bool) -> Self {
        let is_spy = data.is_spy(viewer);
        Self {
            total_rounds: data.total_rounds,
            round: data.round,
            phase: data.phase,
            is_spy,
            location: if is_spy && !finished {
                None
            } else {
                data.location.clone()
            },
            spy: if finished { data.spy.clone() } else { None },
            first_asker: data.first_asker,
            questions: data.questions.clone(),
            votes: data.votes.clone(),
            scores: data.scores.clone(),
            history: data.history.clone(),
            winner: data.winner.clone(),
        }
    }

    pub fn times_asked(&self, player: &PlayerId) -> usize {
        self.questions.iter().filter(|q| &q.target == player).count()
    }
}

impl PlayerView {
    /// Build the view for `seat`.
    pub fn for_seat(machine: &GameMachine, seat: Seat) -> Result<Self, DomainError> {
        let state = machine.state();
        let viewer = state
            .players
            .get(seat)
            .map(|p| p.id.clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("no player at seat {seat}"))
            })?;
        let finished = state.status == GameStatus::Finished;

        let data = match &state.data {
            GameData::TicTacToe(d) => ViewData::TicTacToe(d.clone()),
            GameData::RockPaperScissors(d) => {
                ViewData::RockPaperScissors(RpsView::redact(d, &viewer))
            }
            GameData::Deduction(d) => {
                ViewData::Deduction(DeductionView::redact(d, &viewer, finished))
            }
        };

        Ok(Self {
            viewer,
            seat,
            game_type: state.game_type(),
            status: state.status,
            current_player_index: state.current_player_index,
            turn_epoch: state.turn_epoch,
            players: state.players.clone(),
            data,
            legal_actions: machine.legal_actions(seat),
        })
    }

    /// Build the view for the seat held by `player_id`.
    pub fn for_player(machine: &GameMachine, player_id: &PlayerId) -> Result<Self, DomainError> {
        let seat = machine.state().seat_of(player_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("{player_id} is not seated in this game"),
            )
        })?;
        Self::for_seat(machine, seat)
    }

    /// Moves the viewer may submit right now.
    pub fn legal_actions(&self) -> &[MoveAction] {
        &self.legal_actions
    }

    pub fn can_act(&self) -> bool {
        !self.legal_actions.is_empty()
    }

    pub fn seat_of(&self, player_id: &PlayerId) -> Option<Seat> {
        self.players.iter().position(|p| &p.id == player_id)
    }
}
