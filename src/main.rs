use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use twenty48_engine::{EngineConfig, GameEngine, Move, Score, Tile};

#[derive(Parser, Debug)]
#[command(name = "twenty48", version, about = "Play 2048 games with a simple fixed policy")]
struct Args {
    /// TOML engine config; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Board size (N for an NxN board)
    #[arg(long)]
    size: Option<usize>,
    /// Base RNG seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,
    /// Number of independent games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Move-selection policy
    #[arg(long, value_enum, default_value_t = Policy::Cycle)]
    policy: Policy,
    /// Stop a game after this many board-changing moves
    #[arg(long)]
    max_moves: Option<u64>,
    /// Suppress board printing and the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Prefer Up, Left, Right, Down in that order
    Cycle,
    /// Try directions in a random order each turn
    Random,
}

struct GameResult {
    score: Score,
    highest_tile: Tile,
    moves: u64,
    won: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::from_toml(path)?,
        None => EngineConfig::default(),
    };
    if let Some(size) = args.size {
        cfg.size = size;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    info!(
        "playing {} game(s) on a {}x{} board, policy {:?}",
        args.games, cfg.size, cfg.size, args.policy
    );

    let pb = if !args.quiet && args.games > 1 {
        let pb = ProgressBar::new(args.games as u64);
        let style = ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}")?;
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let print_boards = !args.quiet && args.games == 1;
    let results: Vec<GameResult> = (0..args.games)
        .into_par_iter()
        .map(|idx| {
            let mut game_cfg = cfg.clone();
            game_cfg.seed = cfg.seed.map(|s| s.wrapping_add(idx as u64));
            let result = play_one(&game_cfg, args.policy, args.max_moves, print_boards);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            result
        })
        .collect::<anyhow::Result<_>>()?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    for (idx, r) in results.iter().enumerate() {
        info!(
            "game {idx}: score {}, highest tile {}, moves {}, won {}",
            r.score, r.highest_tile, r.moves, r.won
        );
    }
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let wins = results.iter().filter(|r| r.won).count();
    let mean = results.iter().map(|r| r.score as f64).sum::<f64>() / results.len().max(1) as f64;
    info!(
        "{} game(s) in {:.2}s | best score {best} | mean score {mean:.1} | wins {wins}",
        results.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn play_one(
    cfg: &EngineConfig,
    policy: Policy,
    max_moves: Option<u64>,
    print_boards: bool,
) -> anyhow::Result<GameResult> {
    let mut game = GameEngine::from_config(cfg)?;
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        None => StdRng::from_entropy(),
    };
    if print_boards {
        println!("{game}");
    }
    while game.can_move() {
        if max_moves.is_some_and(|limit| game.moves_made() >= limit) {
            debug!("move limit reached");
            break;
        }
        let mut order = [Move::Up, Move::Left, Move::Right, Move::Down];
        if policy == Policy::Random {
            order.shuffle(&mut rng);
        }
        // make_move is a no-op on blocked directions, so take the first that lands.
        if !order.into_iter().any(|dir| game.make_move(dir)) {
            break;
        }
        if print_boards {
            println!("{game}");
        }
    }
    Ok(GameResult {
        score: game.score(),
        highest_tile: game.highest_tile(),
        moves: game.moves_made(),
        won: game.is_won(),
    })
}
