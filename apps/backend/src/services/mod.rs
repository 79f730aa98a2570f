//! Driver-side services built on top of the game core.

pub mod game_flow;
