use tracing::{debug, info, warn};
use uuid::Uuid;

use super::broadcaster::TurnSnapshot;
use super::store::StoredGame;
use super::GameFlowService;
use crate::ai::BotEngine;
use crate::domain::machine::GameMachine;
use crate::domain::moves::Move;
use crate::domain::player_view::PlayerView;
use crate::domain::seed_derivation::derive_bot_seed;
use crate::domain::state::{GameStatus, Seat};
use crate::error::AppError;

impl GameFlowService {
    /// Let bot seats act until a human must move, the game ends, or the
    /// configured action budget runs out. A bot that fails to produce a legal
    /// move ends the chain; whatever was applied before it is kept.
    ///
    /// Each decision gets its own seed derived from the game's bot seed, the
    /// seat and a running decision counter, so a replayed game makes the
    /// same bot choices.
    pub(super) async fn run_bot_turns(
        &self,
        game_id: Uuid,
        machine: &mut GameMachine,
        stored: &mut StoredGame,
        steps: &mut Vec<TurnSnapshot>,
    ) -> Result<usize, AppError> {
        let mut actions = 0;

        while machine.status() == GameStatus::Playing {
            let Some(seat) = next_bot_seat(machine, stored) else {
                break;
            };
            if actions >= self.config.max_bot_actions {
                warn!(
                    %game_id,
                    max_bot_actions = self.config.max_bot_actions,
                    "Bot action budget exhausted, leaving remaining bot turns"
                );
                break;
            }

            let player_id = machine.state().players[seat].id.clone();
            let Some(config) = stored.bots.get(&player_id).cloned() else {
                break;
            };
            let seed = derive_bot_seed(stored.bot_seed, seat, stored.decisions);
            stored.decisions += 1;

            debug!(%game_id, seat, player_id = %player_id, "Processing bot turn");

            let engine = BotEngine::new(config.with_seed(seed));
            let mv = match play_bot_turn(&engine, machine, seat).await {
                Ok(mv) => mv,
                Err(err) => {
                    warn!(
                        %game_id,
                        seat,
                        player_id = %player_id,
                        error = %err,
                        "Bot turn failed, leaving the seat to act"
                    );
                    break;
                }
            };
            steps.push(TurnSnapshot::of(machine));
            actions += 1;

            info!(
                %game_id,
                seat,
                difficulty = %engine.config().difficulty,
                move_type = mv.action().type_tag(),
                "Bot move applied"
            );
        }

        Ok(actions)
    }
}

async fn play_bot_turn(
    engine: &BotEngine,
    machine: &mut GameMachine,
    seat: Seat,
) -> Result<Move, AppError> {
    let view = PlayerView::for_seat(machine, seat)?;
    let mv = engine.decide_move(&view).await?;
    machine.process_move(&mv)?;
    Ok(mv)
}

/// Lowest seat that belongs to a bot and may act now.
fn next_bot_seat(machine: &GameMachine, stored: &StoredGame) -> Option<Seat> {
    let players = &machine.state().players;
    machine
        .seats_to_act()
        .into_iter()
        .find(|&seat| {
            players
                .get(seat)
                .is_some_and(|p| stored.bots.contains_key(&p.id))
        })
}
