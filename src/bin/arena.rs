//! Arena CLI: run strategy-vs-strategy experiments from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 1000 --p1 maximize_all --p2 maximize_three
//!   cargo run --release --bin arena -- --games 200 --p1 maximize_equal --p2 minimize_enemy --extended

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pots_arena::engine::arena::run_arena;
use pots_arena::engine::bot_strategy::{StrategyLibrary, CHAMPION};
use pots_arena::engine::generator::{GeneratorParams, RandomRowGenerator};

#[derive(Parser)]
#[command(name = "arena", about = "Run head-to-head experiments between two pot strategies")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate who moves first between games
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    alternate_seats: bool,

    /// First strategy
    #[arg(long, default_value = CHAMPION)]
    p1: String,

    /// Second strategy
    #[arg(long, default_value = "maximize_three")]
    p2: String,

    /// Allow strategies from the extended library
    #[arg(long)]
    extended: bool,

    /// Smallest pot count (before rounding down to even)
    #[arg(long, default_value = "4")]
    min_pots: usize,

    /// Largest pot count (before rounding down to even)
    #[arg(long, default_value = "13")]
    max_pots: usize,

    /// Largest pot value
    #[arg(long, default_value = "9")]
    max_value: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let library = if cli.extended {
        StrategyLibrary::extended()
    } else {
        StrategyLibrary::canonical()
    };
    for name in [&cli.p1, &cli.p2] {
        if !library.contains(name) {
            eprintln!("Error: unknown strategy '{}'", name);
            eprintln!("Available strategies: {:?}", library.names());
            std::process::exit(1);
        }
    }
    if cli.p1 == cli.p2 {
        eprintln!("Error: --p1 and --p2 must name different strategies");
        std::process::exit(1);
    }

    let params = GeneratorParams {
        min_pots: cli.min_pots,
        max_pots: cli.max_pots,
        max_value: cli.max_value,
    };
    let mut generator = RandomRowGenerator::new(cli.seed, params)?;

    eprintln!(
        "Arena: {} games, seed={}, alternate_seats={}, pots {}-{} valued 1-{}",
        cli.games, cli.seed, cli.alternate_seats, cli.min_pots, cli.max_pots, cli.max_value
    );
    eprintln!("  {} vs {}", cli.p1, cli.p2);
    eprintln!();

    let total = cli.games;
    let progress_cb = move |done: usize, _total: usize| {
        if done % 100 == 0 || done == total {
            eprint!("\r  [{}/{}] games completed", done, total);
        }
    };

    let result = run_arena(
        &library,
        &cli.p1,
        &cli.p2,
        &mut generator,
        cli.games,
        cli.alternate_seats,
        Some(&progress_cb),
    )?;

    eprintln!("\r                                    "); // clear progress line
    println!("{}", result.summary());
    Ok(())
}
