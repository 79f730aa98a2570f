//! How to register a bot
//!
//! 1) Implement `BotPlayer` for your type in its module.
//! 2) Add a `BotFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed ⇒ same behavior.

use std::sync::Arc;

use crate::ai::{BotPlayer, Difficulty, Heuristic, RandomPlayer, Tactician};

/// Factory definition for constructing bot implementations.
pub struct BotFactory {
    pub difficulty: Difficulty,
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Arc<dyn BotPlayer>,
}

static BOT_FACTORIES: &[BotFactory] = &[
    BotFactory {
        difficulty: Difficulty::Easy,
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    BotFactory {
        difficulty: Difficulty::Medium,
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        make: make_heuristic,
    },
    BotFactory {
        difficulty: Difficulty::Hard,
        name: Tactician::NAME,
        version: Tactician::VERSION,
        make: make_tactician,
    },
];

/// Returns the statically registered bot factories.
pub fn registered_bots() -> &'static [BotFactory] {
    BOT_FACTORIES
}

/// Finds a registered bot factory by its name.
pub fn by_name(name: &str) -> Option<&'static BotFactory> {
    registered_bots().iter().find(|factory| factory.name == name)
}

/// The factory backing a difficulty level.
pub fn by_difficulty(difficulty: Difficulty) -> &'static BotFactory {
    match difficulty {
        Difficulty::Easy => &BOT_FACTORIES[0],
        Difficulty::Medium => &BOT_FACTORIES[1],
        Difficulty::Hard => &BOT_FACTORIES[2],
    }
}

fn make_random_player(seed: Option<u64>) -> Arc<dyn BotPlayer> {
    Arc::new(RandomPlayer::new(seed))
}

fn make_heuristic(seed: Option<u64>) -> Arc<dyn BotPlayer> {
    Arc::new(Heuristic::new(seed))
}

fn make_tactician(seed: Option<u64>) -> Arc<dyn BotPlayer> {
    Arc::new(Tactician::new(seed))
}
