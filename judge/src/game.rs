use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};
use yaniv::{Game, GameConfig, RuleError, TurnOutcome, NUM_PLAYERS};

use crate::player::Player;
use crate::recording::Recorder;

#[derive(Debug)]
pub enum GameResult {
    /// Lowest total wins, the earlier seat on ties.
    Finished {
        scores: [u32; NUM_PLAYERS],
        winner: usize,
    },
    /// Nobody managed to end a round within the turn limit.
    Abandoned { scores: [u32; NUM_PLAYERS] },
    IllegalMoveByPlayer { player_idx: usize, err: RuleError },
}

/// Plays one game between the three seats.
///
/// Returns an error only when dealing or recording fails, not when a player
/// makes an illegal move.
pub fn play_game(
    rng: &mut StdRng,
    players: &mut [Player; NUM_PLAYERS],
    config: &GameConfig,
    max_turns: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut game = Game::new(config.clone(), StdRng::seed_from_u64(rng.gen()));
    if let Some(rec) = recorder {
        rec.start_game(&players.each_ref().map(|p| p.name.as_str()));
    }

    game.start_round()?;
    let mut round = 1;
    let mut result = None;
    for turn in 0..max_turns {
        let Some(player_idx) = game.active_player() else {
            break;
        };
        let outcome = game.play_computer_turn(players[player_idx].strategy.as_mut());
        if let Some(rec) = recorder.as_mut() {
            for event in game.drain_events() {
                rec.store_event(round, event);
            }
        } else {
            game.drain_events().for_each(drop);
        }
        match outcome {
            Ok(TurnOutcome::Played) => {
                trace!(turn, player = %players[player_idx].name, "Played");
            }
            Ok(TurnOutcome::RoundResolved(outcome)) => {
                debug!(round, winner = %players[outcome.winner].name, "Round over");
                round += 1;
                game.start_round()?;
            }
            Ok(TurnOutcome::GameOver(outcome)) => {
                let winner = (0..NUM_PLAYERS)
                    .min_by_key(|&p| outcome.scores[p])
                    .unwrap_or(outcome.winner);
                result = Some(GameResult::Finished {
                    scores: outcome.scores,
                    winner,
                });
                break;
            }
            Err(err) => {
                return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
            }
        }
    }

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    Ok(result.unwrap_or(GameResult::Abandoned {
        scores: game.scores(),
    }))
}
