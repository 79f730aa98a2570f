//! Test support utilities for the gamehall workspace
//!
//! Unified logging initialization for integration tests and helpers that
//! generate unique player/game identifiers so tests never collide.

pub mod logging;
pub mod unique_helpers;
