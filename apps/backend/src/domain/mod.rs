//! Domain layer: pure game logic types and helpers.

pub mod deduction;
pub mod game_transition;
pub mod machine;
pub mod moves;
pub mod player_view;
pub mod rock_paper_scissors;
pub mod rules;
pub mod seed_derivation;
pub mod settings;
pub mod state;
pub mod tic_tac_toe;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_deduction;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_serialization;
#[cfg(test)]
mod tests_rock_paper_scissors;
#[cfg(test)]
mod tests_tic_tac_toe;

// Re-exports for ergonomics
pub use game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
pub use machine::GameMachine;
pub use moves::{Move, MoveAction};
pub use player_view::{PlayerView, ViewData};
pub use rock_paper_scissors::Choice;
pub use settings::GameSettings;
pub use state::{GameData, GameState, GameStatus, GameType, PlayerId, PlayerSeat, Seat};
