//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series -- --variant gomoku --games 20`
//! `cargo run --release --bin engine_match_series -- --config weights.toml --verbose`
//!
//! Player 1 is the heuristic engine (optionally tuned from a TOML file),
//! player 2 the uniform random baseline. `RUST_LOG` overrides the log filter.

use std::path::PathBuf;

use plum_games::engines::engine_config::HeuristicConfig;
use plum_games::engines::engine_heuristic::HeuristicEngine;
use plum_games::engines::engine_random::RandomEngine;
use plum_games::engines::engine_trait::Engine;
use plum_games::game_state::game_types::Variant;
use plum_games::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use tracing_subscriber::EnvFilter;

struct Args {
    variant: Variant,
    games: u16,
    seed: u64,
    max_plies: u16,
    config: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        variant: Variant::Xiangqi,
        games: 10,
        seed: 1234,
        max_plies: 300,
        config: None,
        verbose: false,
    };

    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--variant" => {
                let name = value()?;
                args.variant =
                    Variant::from_name(&name).ok_or_else(|| format!("unknown variant {name}"))?;
            }
            "--games" => args.games = value()?.parse().map_err(|e| format!("--games: {e}"))?,
            "--seed" => args.seed = value()?.parse().map_err(|e| format!("--seed: {e}"))?,
            "--max-plies" => {
                args.max_plies = value()?.parse().map_err(|e| format!("--max-plies: {e}"))?
            }
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--verbose" | "-v" => args.verbose = true,
            other => return Err(format!("unknown argument {other}")),
        }
    }

    Ok(args)
}

fn main() -> Result<(), String> {
    let args = parse_args()?;

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let heuristic = match &args.config {
        Some(path) => HeuristicConfig::load(path).map_err(|e| e.to_string())?,
        None => HeuristicConfig::default(),
    };

    let player1 = || Box::new(HeuristicEngine::new(heuristic.clone())) as Box<dyn Engine>;
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            variant: args.variant,
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: args.max_plies,
                ..MatchConfig::default()
            },
            verbose: args.verbose,
        },
    )
    .map_err(|e| e.to_string())?;

    println!("variant={} {}", args.variant, stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
