//! Random bot - makes random legal moves.
//!
//! [`RandomPlayer`] is the easy difficulty and the reference implementation
//! of [`BotPlayer`](super::BotPlayer). It is also the fallback every smarter
//! strategy drops to when it has nothing better to go on.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, BotPlayer};
use crate::domain::moves::MoveAction;
use crate::domain::player_view::PlayerView;

/// Bot that picks uniformly among the legal actions.
///
/// - **Thread-safe**: `Mutex<StdRng>` gives interior mutability behind `&self`
/// - **Deterministic**: optional seed for reproducible behavior
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Pick uniformly from `options`.
    pub fn pick<T: Clone>(&self, options: &[T]) -> Result<T, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AiError::NoLegalMove("nothing to choose from".into()))
    }

    /// True with probability `p`.
    pub fn chance(&self, p: f64) -> Result<bool, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(rng.random_bool(p))
    }
}

impl BotPlayer for RandomPlayer {
    fn choose_action(&self, view: &PlayerView) -> Result<MoveAction, AiError> {
        let legal = view.legal_actions();
        if legal.is_empty() {
            return Err(AiError::NoLegalMove(format!(
                "seat {} has nothing to do",
                view.seat
            )));
        }
        self.pick(legal)
    }
}
