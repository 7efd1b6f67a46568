use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use itertools::Itertools;
use judge::{load_game_config, play_game, GameResult, Player, PlayerKind, Recorder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use yaniv::{GameConfig, JsonFileStore, Leaderboard, ScoreEntry, NUM_PLAYERS};

#[derive(Parser)]
struct Args {
    /// The strategy of each seat, separated by commas
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [PlayerKind::Heuristic, PlayerKind::Heuristic, PlayerKind::Heuristic]
    )]
    players: Vec<PlayerKind>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// Rounds per game, overriding the config file
    #[arg(short = 'R', long)]
    rounds: Option<u32>,

    /// A JSON file with the game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a game after this many turns
    #[arg(long, default_value_t = 2000)]
    max_turns: usize,

    /// Record the events of each game as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Enter the first seat's final scores into this leaderboard file
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// Name of the first seat, overriding the config file
    #[arg(long)]
    name: Option<String>,

    /// Date stored with leaderboard entries as YYYY-MM-DD, today (UTC) by default
    #[arg(long)]
    date: Option<NaiveDate>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    wins: [usize; NUM_PLAYERS],
    illegal_moves: [usize; NUM_PLAYERS],
    abandoned: usize,
    total_scores: [u64; NUM_PLAYERS],
    finished: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    anyhow::ensure!(
        args.players.len() == NUM_PLAYERS,
        "Expected {} players, got {}",
        NUM_PLAYERS,
        args.players.len()
    );

    let mut config = match &args.config {
        Some(path) => load_game_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(name) = args.name {
        config.player_names[0] = name;
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut players: [Player; NUM_PLAYERS] = std::array::from_fn(|i| {
        Player::new(&config.player_names[i], args.players[i], rng.gen())
    });

    let store = args.leaderboard.map(JsonFileStore::new);
    let mut leaderboard = store.as_ref().map(|store| Leaderboard::load(store));
    let date = args
        .date
        .unwrap_or_else(|| Utc::now().date_naive())
        .to_string();

    let mut tally = Tally::default();
    for game_idx in 0..args.num_games {
        match play_game(&mut rng, &mut players, &config, args.max_turns, &mut recorder)? {
            GameResult::Finished { scores, winner } => {
                debug!(game_idx, winner = %players[winner].name, ?scores);
                tally.wins[winner] += 1;
                tally.finished += 1;
                for (total, score) in tally.total_scores.iter_mut().zip(scores) {
                    *total += u64::from(score);
                }
                if let Some(board) = leaderboard.as_mut() {
                    board.record(ScoreEntry {
                        name: players[0].name.clone(),
                        score: scores[0],
                        date: date.clone(),
                    });
                }
            }
            GameResult::Abandoned { scores } => {
                info!(game_idx, ?scores, "Game abandoned after {} turns", args.max_turns);
                tally.abandoned += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = %players[player_idx].name,
                    game_idx, "Illegal move by player: {}", err
                );
                tally.illegal_moves[player_idx] += 1;
            }
        }
    }

    print_results(&players, &tally);

    if let (Some(store), Some(board)) = (&store, &leaderboard) {
        if let Err(err) = board.save(store) {
            error!("Could not save the leaderboard: {:#}", err);
        }
        println!("\nLeaderboard:");
        for (rank, entry) in board.entries().iter().enumerate() {
            println!(
                "{}. {:<12} {:>4}  {}",
                rank + 1,
                entry.name,
                entry.score,
                entry.date
            );
        }
    }

    Ok(())
}

fn print_results(players: &[Player; NUM_PLAYERS], tally: &Tally) {
    let header = players
        .iter()
        .map(|p| format!("{:>16}", format!("{} ({:?})", p.name, p.kind)))
        .join(" |");
    println!("\n{:<14}|{}", "", header);
    let row = |label: &str, cells: Vec<String>| {
        println!(
            "{:<14}|{}",
            label,
            cells.iter().map(|c| format!("{:>16}", c)).join(" |")
        );
    };
    row("wins", tally.wins.iter().map(usize::to_string).collect());
    row(
        "illegal moves",
        tally.illegal_moves.iter().map(usize::to_string).collect(),
    );
    row(
        "mean score",
        tally
            .total_scores
            .iter()
            .map(|&total| {
                if tally.finished == 0 {
                    String::from("N/A")
                } else {
                    format!("{:.1}", total as f64 / tally.finished as f64)
                }
            })
            .collect(),
    );
    println!("\n{} games abandoned", tally.abandoned);
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
