//! Bot players - automated decisions for bot seats.
//!
//! This module provides:
//! - `BotPlayer` trait for strategy implementations
//! - RandomPlayer (easy), Heuristic (medium) and Tactician (hard)
//! - A static registry keyed by difficulty
//! - `BotEngine`, which turns a player view into a tagged move

pub mod config;
pub mod engine;
mod heuristic;
mod random;
pub mod registry;
mod tactician;
mod trait_def;

pub use config::{BotConfig, Difficulty};
pub use engine::BotEngine;
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use tactician::Tactician;
pub use trait_def::{AiError, BotPlayer};
