use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pots_arena::engine::arena::{run_regression, RegressionOptions};
use pots_arena::engine::bot_strategy::StrategyLibrary;
use pots_arena::engine::error::HarnessError;
use pots_arena::engine::generator::{parse_row, FixedRowGenerator, RandomRowGenerator, RowGenerator};
use pots_arena::engine::harness_profiles::{resolve_params, HarnessOverrides};
use pots_arena::engine::reporter::{JsonLinesReporter, Reporter, TracingReporter};

#[derive(Parser)]
#[command(name = "pots-regress", about = "Check that the champion strategy never loses to the library")]
struct Cli {
    /// Number of generated rows
    #[arg(long)]
    trials: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Profile name (from harness_profiles.toml)
    #[arg(long)]
    profile: Option<String>,

    /// Path to harness_profiles.toml (default: auto-discover)
    #[arg(long, env = "POTS_PROFILES")]
    profiles: Option<PathBuf>,

    /// Champion strategy name
    #[arg(long)]
    champion: Option<String>,

    /// Include maximize_equal in the library
    #[arg(long)]
    extended: bool,

    /// Play trials in parallel
    #[arg(long)]
    parallel: bool,

    /// Keep going after a champion loss and report every loss
    #[arg(long)]
    collect: bool,

    /// Literal row such as 2,3,2,1,3,2 (repeatable); replaces random generation
    #[arg(long = "row")]
    rows: Vec<String>,

    /// Write JSON lines to stdout instead of log events
    #[arg(long)]
    json: bool,

    /// Smallest pot count (before rounding down to even)
    #[arg(long)]
    min_pots: Option<usize>,

    /// Largest pot count (before rounding down to even)
    #[arg(long)]
    max_pots: Option<usize>,

    /// Largest pot value
    #[arg(long)]
    max_value: Option<u32>,
}

impl Cli {
    fn overrides(&self) -> HarnessOverrides {
        HarnessOverrides {
            trials: self.trials,
            seed: self.seed,
            champion: self.champion.clone(),
            min_pots: self.min_pots,
            max_pots: self.max_pots,
            max_value: self.max_value,
            extended_library: self.extended,
            parallel: self.parallel,
            collect: self.collect,
            fixed_rows: self.rows.len(),
        }
    }
}

fn parse_rows(rows: &[String]) -> Result<Vec<Vec<u32>>, String> {
    rows.iter().map(|r| parse_row(r)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = resolve_params(cli.profile.as_deref(), cli.profiles.as_deref(), &cli.overrides())?;

    let library = if params.extended_library {
        StrategyLibrary::extended()
    } else {
        StrategyLibrary::canonical()
    };

    let fixed_rows = parse_rows(&cli.rows)?;
    let mut generator: Box<dyn RowGenerator> = if fixed_rows.is_empty() {
        Box::new(RandomRowGenerator::new(params.seed, params.generator)?)
    } else {
        Box::new(FixedRowGenerator::new(fixed_rows))
    };

    let mut reporter: Box<dyn Reporter> = if cli.json {
        Box::new(JsonLinesReporter::new(std::io::stdout().lock()))
    } else {
        Box::new(TracingReporter)
    };

    let options = RegressionOptions {
        trials: params.trials,
        parallel: params.parallel,
        halt_on_failure: params.halt_on_failure,
    };

    eprintln!(
        "Testing [{}] against {} strategies over {} rows (seed={})",
        params.champion,
        library.len(),
        params.trials,
        params.seed
    );

    match run_regression(&library, &params.champion, generator.as_mut(), reporter.as_mut(), &options) {
        Ok(summary) if summary.passed() => {
            eprintln!("PASS: {} trials, {} matches", summary.trials, summary.records);
            Ok(())
        }
        Ok(summary) => {
            eprintln!(
                "FAIL: {} losses in {} trials, {} matches",
                summary.failures.len(),
                summary.trials,
                summary.records
            );
            for failure in &summary.failures {
                eprintln!("  {}", serde_json::to_string(failure)?);
            }
            std::process::exit(1);
        }
        Err(HarnessError::ChampionLost(failure)) => {
            eprintln!("FAIL: {}", failure);
            eprintln!("  reproduce with: --row {}", join_row(&failure.row));
            eprintln!("  {}", serde_json::to_string(&failure)?);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn join_row(row: &[u32]) -> String {
    row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}
