//! Hidden-role deduction game.
//!
//! Each round one seat is secretly the spy and everybody else knows the
//! secret location. Seats question each other in a chain (the target of a
//! question asks next, and may not immediately ask back). After one question
//! per seat the table votes simultaneously. A unique plurality on the spy is
//! a civilian win; anything else is a spy win. On its own turn the spy may
//! instead name the location: right wins the round, wrong loses it.
//!
//! Role and location draws come from a ChaCha stream seeded by the game seed
//! and round number, so a replay reproduces every assignment.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::moves::MoveAction;
use crate::domain::rules::{ensure, unknown_move, Transition};
use crate::domain::seed_derivation::derive_round_seed;
use crate::domain::settings::DEFAULT_DEDUCTION_ROUNDS;
use crate::domain::state::{PlayerId, PlayerSeat, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

pub const LOCATIONS: [&str; 16] = [
    "airport",
    "bank",
    "beach",
    "casino",
    "cathedral",
    "circus",
    "embassy",
    "hospital",
    "hotel",
    "library",
    "museum",
    "restaurant",
    "school",
    "space_station",
    "submarine",
    "theater",
];

pub const SPY_WIN_POINTS: u32 = 2;
pub const CIVILIAN_WIN_POINTS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionPhase {
    Questioning,
    Voting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub asker: PlayerId,
    pub target: PlayerId,
}

/// Role reveal for a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionRoundResult {
    pub round: u32,
    pub spy: PlayerId,
    pub location: String,
    pub accused: Option<PlayerId>,
    pub guessed_location: Option<String>,
    pub spy_won: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionData {
    pub seed: u64,
    pub total_rounds: u32,
    /// 1-based; 0 before the game starts.
    pub round: u32,
    pub phase: DeductionPhase,
    pub location: Option<String>,
    pub spy: Option<PlayerId>,
    pub first_asker: Seat,
    pub questions: Vec<Question>,
    pub votes: BTreeMap<PlayerId, PlayerId>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub history: Vec<DeductionRoundResult>,
    pub winner: Option<PlayerId>,
}

impl DeductionData {
    pub fn new(seed: u64, total_rounds: u32) -> Self {
        Self {
            seed,
            total_rounds,
            round: 0,
            phase: DeductionPhase::Questioning,
            location: None,
            spy: None,
            first_asker: 0,
            questions: Vec::new(),
            votes: BTreeMap::new(),
            scores: BTreeMap::new(),
            history: Vec::new(),
            winner: None,
        }
    }

    pub fn is_spy(&self, player: &PlayerId) -> bool {
        self.spy.as_ref() == Some(player)
    }

    /// The seat that asked the last question, if that question was aimed at
    /// `player`. Asking straight back is not allowed.
    pub fn last_asker_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        self.questions
            .last()
            .filter(|q| &q.target == player)
            .map(|q| &q.asker)
    }

    /// How often each player has been questioned this round.
    pub fn times_asked(&self, player: &PlayerId) -> usize {
        self.questions.iter().filter(|q| &q.target == player).count()
    }
}

impl Default for DeductionData {
    fn default() -> Self {
        Self::new(0, DEFAULT_DEDUCTION_ROUNDS)
    }
}

pub fn start(data: &mut DeductionData, players: &[PlayerSeat]) -> Seat {
    let (seed, total_rounds) = (data.seed, data.total_rounds);
    *data = DeductionData::new(seed, total_rounds);
    data.scores = players.iter().map(|p| (p.id.clone(), 0)).collect();
    begin_round(data, players, 1)
}

/// Draw the spy and location for `round` and return the opening asker.
///
/// Openers rotate with the round number: round 1 opens at seat 0.
fn begin_round(data: &mut DeductionData, players: &[PlayerSeat], round: u32) -> Seat {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_round_seed(data.seed, round));
    let spy_seat = rng.random_range(0..players.len() as u32) as usize;
    let location = LOCATIONS[rng.random_range(0..LOCATIONS.len() as u32) as usize];

    let first_asker = (round as usize - 1) % players.len();
    data.round = round;
    data.phase = DeductionPhase::Questioning;
    data.location = Some(location.to_string());
    data.spy = Some(players[spy_seat].id.clone());
    data.first_asker = first_asker;
    data.questions.clear();
    data.votes.clear();
    first_asker
}

pub fn actors(data: &DeductionData, players: &[PlayerSeat], current: Seat) -> Vec<Seat> {
    match data.phase {
        DeductionPhase::Questioning => vec![current],
        DeductionPhase::Voting => players
            .iter()
            .enumerate()
            .filter(|(_, p)| !data.votes.contains_key(&p.id))
            .map(|(seat, _)| seat)
            .collect(),
    }
}

pub fn check(
    data: &DeductionData,
    players: &[PlayerSeat],
    current: Seat,
    seat: Seat,
    action: &MoveAction,
) -> Result<(), DomainError> {
    let player = &players[seat].id;
    let is_seated = |id: &PlayerId| players.iter().any(|p| &p.id == id);

    match action {
        MoveAction::Ask { target } => {
            ensure_questioning_turn(data, current, seat)?;
            ensure(is_seated(target), ValidationKind::IllegalMove, || {
                format!("{target} is not at the table")
            })?;
            ensure(target != player, ValidationKind::IllegalMove, || {
                "cannot question yourself".into()
            })?;
            ensure(
                data.last_asker_of(player) != Some(target),
                ValidationKind::IllegalMove,
                || format!("cannot ask {target} straight back"),
            )
        }
        MoveAction::GuessLocation { location } => {
            ensure_questioning_turn(data, current, seat)?;
            ensure(data.is_spy(player), ValidationKind::IllegalMove, || {
                "only the spy may name the location".into()
            })?;
            ensure(
                LOCATIONS.contains(&location.as_str()),
                ValidationKind::IllegalMove,
                || format!("'{location}' is not a location"),
            )
        }
        MoveAction::Vote { suspect } => {
            ensure(
                data.phase == DeductionPhase::Voting,
                ValidationKind::PhaseMismatch,
                || "voting has not opened".into(),
            )?;
            ensure(!data.votes.contains_key(player), ValidationKind::OutOfTurn, || {
                format!("{player} already voted")
            })?;
            ensure(
                is_seated(suspect) && suspect != player,
                ValidationKind::IllegalMove,
                || format!("cannot accuse {suspect}"),
            )
        }
        other => Err(unknown_move("deduction", other.type_tag())),
    }
}

fn ensure_questioning_turn(
    data: &DeductionData,
    current: Seat,
    seat: Seat,
) -> Result<(), DomainError> {
    ensure(
        data.phase == DeductionPhase::Questioning,
        ValidationKind::PhaseMismatch,
        || "questioning is over".into(),
    )?;
    ensure(seat == current, ValidationKind::OutOfTurn, || {
        format!("seat {seat} moved but seat {current} is to act")
    })
}

pub fn apply(
    data: &mut DeductionData,
    players: &[PlayerSeat],
    current: Seat,
    seat: Seat,
    action: &MoveAction,
) -> Transition {
    let player = players[seat].id.clone();
    match action {
        MoveAction::Ask { target } => {
            data.questions.push(Question {
                asker: player,
                target: target.clone(),
            });
            if data.questions.len() >= players.len() {
                data.phase = DeductionPhase::Voting;
                return Transition::open_phase(data.first_asker);
            }
            let next = players
                .iter()
                .position(|p| &p.id == target)
                .unwrap_or(current);
            Transition::continue_with(next)
        }
        MoveAction::GuessLocation { location } => {
            let correct = data.location.as_deref() == Some(location.as_str());
            finish_round(data, players, current, None, Some(location.clone()), correct)
        }
        MoveAction::Vote { suspect } => {
            data.votes.insert(player, suspect.clone());
            if data.votes.len() < players.len() {
                return Transition::continue_with(current);
            }
            let accused = tally_votes(&data.votes);
            let spy_won = accused.is_none() || accused != data.spy;
            finish_round(data, players, current, accused, None, spy_won)
        }
        _ => Transition::continue_with(current),
    }
}

/// The unique most-voted suspect; ties accuse nobody.
pub fn tally_votes(votes: &BTreeMap<PlayerId, PlayerId>) -> Option<PlayerId> {
    let mut counts: BTreeMap<&PlayerId, u32> = BTreeMap::new();
    for suspect in votes.values() {
        *counts.entry(suspect).or_insert(0) += 1;
    }
    let top = counts.values().copied().max()?;
    let mut leaders = counts.iter().filter(|(_, c)| **c == top);
    match (leaders.next(), leaders.next()) {
        (Some((id, _)), None) => Some((*id).clone()),
        _ => None,
    }
}

fn finish_round(
    data: &mut DeductionData,
    players: &[PlayerSeat],
    current: Seat,
    accused: Option<PlayerId>,
    guessed_location: Option<String>,
    spy_won: bool,
) -> Transition {
    let spy = data.spy.clone().unwrap_or_else(|| players[0].id.clone());
    for p in players {
        let points = match (spy_won, p.id == spy) {
            (true, true) => SPY_WIN_POINTS,
            (false, false) => CIVILIAN_WIN_POINTS,
            _ => 0,
        };
        *data.scores.entry(p.id.clone()).or_insert(0) += points;
    }

    data.history.push(DeductionRoundResult {
        round: data.round,
        spy,
        location: data.location.clone().unwrap_or_default(),
        accused,
        guessed_location,
        spy_won,
    });

    if data.round >= data.total_rounds {
        data.winner = top_scorer(&data.scores);
        return Transition::finish(current);
    }

    let next = begin_round(data, players, data.round + 1);
    Transition::open_phase(next)
}

fn top_scorer(scores: &BTreeMap<PlayerId, u32>) -> Option<PlayerId> {
    let top = scores.values().copied().max()?;
    let mut leaders = scores.iter().filter(|(_, s)| **s == top);
    match (leaders.next(), leaders.next()) {
        (Some((id, _)), None) => Some(id.clone()),
        _ => None,
    }
}

pub fn legal_actions(
    data: &DeductionData,
    players: &[PlayerSeat],
    current: Seat,
    seat: Seat,
) -> Vec<MoveAction> {
    let mut candidates = Vec::new();
    match data.phase {
        DeductionPhase::Questioning => {
            candidates.extend(
                players
                    .iter()
                    .map(|p| MoveAction::Ask { target: p.id.clone() }),
            );
            candidates.extend(LOCATIONS.iter().map(|l| MoveAction::GuessLocation {
                location: l.to_string(),
            }));
        }
        DeductionPhase::Voting => {
            candidates.extend(players.iter().map(|p| MoveAction::Vote {
                suspect: p.id.clone(),
            }));
        }
    }
    candidates
        .into_iter()
        .filter(|a| check(data, players, current, seat, a).is_ok())
        .collect()
}
