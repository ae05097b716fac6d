//! Headless simulator.
//! Plays seeded games with the greedy policy in every seat and reports results.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use yahtzee_engine::{GameBuilder, GameConfig, GameResult, GreedyPolicy, PlayerId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Yahtzee games with the greedy policy")]
struct Args {
    /// Number of games to play.
    #[arg(short, long, default_value = "100")]
    games: u32,

    /// Seed of the first game; game `i` uses `seed + i`. Overrides the config.
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML game configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop rolling once a category would score at least this much.
    #[arg(long, default_value = "25")]
    stop_at: u32,

    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let base_seed = args.seed.unwrap_or(config.seed);
    let policy = GreedyPolicy::new(args.stop_at);
    let seats = config.players.len();

    let mut wins = vec![0u32; seats];
    let mut grand_sums = vec![0u64; seats];
    let mut draws = 0u32;
    let mut best = 0u32;

    for i in 0..args.games {
        let seed = base_seed.wrapping_add(u64::from(i));
        let mut game = GameBuilder::new()
            .config(config.clone())
            .seed(seed)
            .build()
            .context("building game")?;

        let result = policy.play_game(&mut game).context("playing game")?;

        for player in PlayerId::all(seats) {
            let grand = game.totals(player)?.grand;
            grand_sums[player.index()] += u64::from(grand);
            best = best.max(grand);
            if result.is_winner(player) {
                wins[player.index()] += 1;
            }
        }
        if matches!(result, GameResult::Draw) {
            draws += 1;
        }

        info!(game = i, seed, ?result, "game finished");
    }

    let games = u64::from(args.games.max(1));
    for (i, name) in config.players.iter().enumerate() {
        println!(
            "{name:>12}: {wins:>5} wins, mean score {mean:.1}",
            wins = wins[i],
            mean = grand_sums[i] as f64 / games as f64,
        );
    }
    println!("{:>12}: {draws:>5}", "draws");
    println!("{:>12}: {best:>5}", "best score");

    Ok(())
}
