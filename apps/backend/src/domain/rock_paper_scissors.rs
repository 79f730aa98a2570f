//! Rock/paper/scissors tournament with simultaneous choices.
//!
//! A round opens in `Choosing`: every seat locks in one choice, in any order.
//! The last choice resolves the round and passes the turn index one seat
//! clockwise. The tournament then waits in `AwaitingReady` until every seat
//! confirms, and the next round opens. The first player whose score reaches
//! the target wins.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::moves::MoveAction;
use crate::domain::rules::{ensure, unknown_move, Transition};
use crate::domain::settings::DEFAULT_TARGET_SCORE;
use crate::domain::state::{next_seat, PlayerId, PlayerSeat, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub const fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }

    /// The choice that defeats `self` (rock → paper → scissors → rock).
    pub const fn counter(self) -> Choice {
        match self {
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
            Choice::Scissors => Choice::Rock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpsPhase {
    Choosing,
    AwaitingReady,
}

/// One resolved round. `winner` is `None` on a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsRound {
    pub choices: BTreeMap<PlayerId, Choice>,
    pub winner: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpsData {
    pub target_score: u32,
    pub phase: RpsPhase,
    pub rounds: Vec<RpsRound>,
    pub ready: BTreeSet<PlayerId>,
    pub pending: BTreeMap<PlayerId, Choice>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub winner: Option<PlayerId>,
}

impl RpsData {
    pub fn new(target_score: u32) -> Self {
        Self {
            target_score,
            phase: RpsPhase::Choosing,
            rounds: Vec::new(),
            ready: BTreeSet::new(),
            pending: BTreeMap::new(),
            scores: BTreeMap::new(),
            winner: None,
        }
    }
}

impl Default for RpsData {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SCORE)
    }
}

/// Open the first round with zeroed scores. Seat 0 holds the first turn index.
pub fn start(data: &mut RpsData, players: &[PlayerSeat]) -> Seat {
    let target_score = data.target_score;
    *data = RpsData::new(target_score);
    data.scores = players.iter().map(|p| (p.id.clone(), 0)).collect();
    0
}

/// Round winner: exactly two distinct choices present and a single holder
/// of the winning one. Everything else is a draw.
pub fn resolve_round(choices: &BTreeMap<PlayerId, Choice>) -> Option<PlayerId> {
    let distinct: BTreeSet<Choice> = choices.values().copied().collect();
    let mut iter = distinct.into_iter();
    let (Some(a), Some(b), None) = (iter.next(), iter.next(), iter.next()) else {
        return None;
    };
    let winning = if a.beats(b) { a } else { b };
    let mut holders = choices.iter().filter(|(_, c)| **c == winning);
    match (holders.next(), holders.next()) {
        (Some((id, _)), None) => Some(id.clone()),
        _ => None,
    }
}

pub fn actors(data: &RpsData, players: &[PlayerSeat]) -> Vec<Seat> {
    if data.winner.is_some() {
        return Vec::new();
    }
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| match data.phase {
            RpsPhase::Choosing => !data.pending.contains_key(&p.id),
            RpsPhase::AwaitingReady => !data.ready.contains(&p.id),
        })
        .map(|(seat, _)| seat)
        .collect()
}

pub fn check(data: &RpsData, player: &PlayerId, action: &MoveAction) -> Result<(), DomainError> {
    ensure(data.winner.is_none(), ValidationKind::PhaseMismatch, || {
        "tournament is decided".into()
    })?;
    match action {
        MoveAction::Choose { .. } => {
            ensure(
                data.phase == RpsPhase::Choosing,
                ValidationKind::PhaseMismatch,
                || "waiting for players to confirm the next round".into(),
            )?;
            ensure(
                !data.pending.contains_key(player),
                ValidationKind::OutOfTurn,
                || format!("{player} already chose this round"),
            )
        }
        MoveAction::Ready => {
            ensure(
                data.phase == RpsPhase::AwaitingReady,
                ValidationKind::PhaseMismatch,
                || "round is still open".into(),
            )?;
            ensure(!data.ready.contains(player), ValidationKind::OutOfTurn, || {
                format!("{player} is already ready")
            })
        }
        other => Err(unknown_move("rock_paper_scissors", other.type_tag())),
    }
}

/// Apply a checked move.
///
/// The turn index is held while choices are still missing and advances
/// round-robin once the round resolves. Reopening the table after the ready
/// gate starts a new phase at the same index.
pub fn apply(
    data: &mut RpsData,
    players: &[PlayerSeat],
    current: Seat,
    player: &PlayerId,
    action: &MoveAction,
) -> Transition {
    match action {
        MoveAction::Choose { choice } => {
            data.pending.insert(player.clone(), *choice);
            if data.pending.len() < players.len() {
                return Transition::continue_with(current);
            }

            let choices = std::mem::take(&mut data.pending);
            let winner = resolve_round(&choices);
            if let Some(w) = &winner {
                *data.scores.entry(w.clone()).or_insert(0) += 1;
            }
            data.rounds.push(RpsRound {
                choices,
                winner: winner.clone(),
            });

            let champion = winner
                .filter(|w| data.scores.get(w).copied().unwrap_or(0) >= data.target_score);
            if let Some(champion) = champion {
                data.winner = Some(champion);
                return Transition::finish(current);
            }

            data.phase = RpsPhase::AwaitingReady;
            data.ready.clear();
            Transition::open_phase(next_seat(current, players.len()))
        }
        MoveAction::Ready => {
            data.ready.insert(player.clone());
            if data.ready.len() < players.len() {
                return Transition::continue_with(current);
            }
            data.ready.clear();
            data.phase = RpsPhase::Choosing;
            Transition::open_phase(current)
        }
        _ => Transition::continue_with(current),
    }
}

pub fn legal_actions(data: &RpsData, player: &PlayerId) -> Vec<MoveAction> {
    let candidates: Vec<MoveAction> = match data.phase {
        RpsPhase::Choosing => Choice::ALL
            .into_iter()
            .map(|choice| MoveAction::Choose { choice })
            .collect(),
        RpsPhase::AwaitingReady => vec![MoveAction::Ready],
    };
    candidates
        .into_iter()
        .filter(|a| check(data, player, a).is_ok())
        .collect()
}
