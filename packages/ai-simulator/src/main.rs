//! Bot-vs-bot simulator.
//!
//! Runs whole games in memory through the game flow service and prints a
//! JSON summary of per-seat results on stdout.

mod metrics;
mod output;
mod simulator;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use gamehall::domain::GameType;
use gamehall::telemetry::{init_tracing, LogFormat};
use gamehall::Difficulty;
use output::JsonlWriter;
use simulator::Simulator;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Fast in-memory bot-vs-bot game simulator")]
struct Args {
    /// Rule set to play
    #[arg(long, default_value = "tic_tac_toe")]
    game: GameType,

    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Bot difficulty per seat, in seat order
    #[arg(long, value_delimiter = ',', default_value = "hard,hard")]
    seats: Vec<Difficulty>,

    /// Base seed; game N plays with `seed + N`
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of compact text
    #[arg(long)]
    json_logs: bool,

    /// Write one JSON line per game to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_tracing(format, if args.verbose { "debug" } else { "warn" });

    let (min, max) = args.game.player_range();
    if !(min..=max).contains(&args.seats.len()) {
        return Err(format!(
            "{} needs {min}..={max} seats, got {}",
            args.game,
            args.seats.len()
        )
        .into());
    }

    info!(game = %args.game, games = args.games, seats = ?args.seats, "Starting simulation");

    let mut writer = args.output.as_deref().map(JsonlWriter::create).transpose()?;
    let simulator = Simulator::new(args.game, args.seats.clone());

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_no in 1..=args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_no)),
            None => rand::random(),
        };

        match simulator.simulate_game(game_no, seed).await {
            Ok(result) => {
                if let Some(writer) = writer.as_mut() {
                    if let Err(e) = writer.write(&result) {
                        warn!(game_no, error = %e, "Failed to write game result");
                    }
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game_no, seed, error = %e, "Game failed");
            }
        }
    }

    if let Some(writer) = writer {
        info!(path = %writer.path().display(), "Per-game results written");
        writer.finish()?;
    }

    let summary = metrics::summarize(
        args.game,
        &args.seats,
        args.games,
        &results,
        errors,
        start.elapsed().as_secs_f64() * 1000.0,
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
