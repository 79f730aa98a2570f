//! Engine configuration loaded from the environment.
//!
//! Every knob has a default so a bare environment yields a working engine.
//! Set values are parsed strictly; a malformed value is a configuration
//! error rather than a silent fallback.

use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Default time budget for a single turn.
pub const DEFAULT_TURN_TIMER_LIMIT: Duration = Duration::from_secs(30);
/// Minimum delay between a failed timeout attempt and the next retry.
pub const DEFAULT_RETRY_DEBOUNCE: Duration = Duration::from_millis(1500);
/// Upper bound on consecutive bot actions processed after one submission.
pub const DEFAULT_MAX_BOT_ACTIONS: usize = 64;

/// Runtime configuration shared by the game flow and the timeout controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Time a player has before the timeout controller fires.
    pub turn_timer_limit: Duration,
    /// Debounce window between a failed timeout submission and its retry.
    pub retry_debounce: Duration,
    /// Guard against runaway bot loops.
    pub max_bot_actions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_timer_limit: DEFAULT_TURN_TIMER_LIMIT,
            retry_debounce: DEFAULT_RETRY_DEBOUNCE,
            max_bot_actions: DEFAULT_MAX_BOT_ACTIONS,
        }
    }
}

impl EngineConfig {
    /// Build configuration from process environment variables:
    ///
    /// - `TURN_TIMER_LIMIT_SECS` (default 30)
    /// - `TIMEOUT_RETRY_DEBOUNCE_MS` (default 1500)
    /// - `MAX_BOT_ACTIONS` (default 64)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let turn_timer_limit = parse_var::<u64, _>(&lookup, "TURN_TIMER_LIMIT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.turn_timer_limit);
        if turn_timer_limit.is_zero() {
            return Err(AppError::config(
                "TURN_TIMER_LIMIT_SECS must be greater than zero",
            ));
        }

        let retry_debounce = parse_var::<u64, _>(&lookup, "TIMEOUT_RETRY_DEBOUNCE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_debounce);

        let max_bot_actions =
            parse_var::<usize, _>(&lookup, "MAX_BOT_ACTIONS")?.unwrap_or(defaults.max_bot_actions);

        Ok(Self {
            turn_timer_limit,
            retry_debounce,
            max_bot_actions,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::config(format!("{key}={raw:?} is invalid: {e}"))),
    }
}
