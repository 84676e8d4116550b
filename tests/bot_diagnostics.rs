//! Long-running strategy diagnostics.
//!
//! These are NOT run in CI. Use them locally to see how often the champion
//! loses and how the library ranks head-to-head.
//!
//! Run with:
//!     cargo test --release --test bot_diagnostics -- --ignored --nocapture

use std::collections::BTreeMap;

use pots_arena::engine::arena::{run_arena, run_regression, RegressionOptions};
use pots_arena::engine::bot_strategy::{StrategyLibrary, CHAMPION};
use pots_arena::engine::generator::{GeneratorParams, RandomRowGenerator};
use pots_arena::engine::reporter::NullReporter;

/// The reference harness shape: 9999 rows of 4-12 pots valued 1-9.
/// Prints every loss grouped by challenger.
#[test]
#[ignore]
fn champion_survey_reference_shape() {
    let library = StrategyLibrary::canonical();
    let mut gen = RandomRowGenerator::new(42, GeneratorParams::default()).unwrap();
    let options = RegressionOptions { trials: 9999, parallel: true, halt_on_failure: false };
    let summary = run_regression(&library, CHAMPION, &mut gen, &mut NullReporter, &options).unwrap();

    let mut by_challenger: BTreeMap<&str, usize> = BTreeMap::new();
    for failure in &summary.failures {
        *by_challenger.entry(failure.challenger.as_str()).or_insert(0) += 1;
    }
    println!("\n{} trials, {} matches, {} losses", summary.trials, summary.records, summary.failures.len());
    for (name, count) in &by_challenger {
        println!("  {:>16}: {}", name, count);
    }
    if let Some(first) = summary.first_failure() {
        println!("  first: {}", first);
    }

    assert_eq!(summary.trials, 9999);
    assert_eq!(summary.records, 9999 * library.len());
}

/// Champion against every other strategy, 2000 games each, alternating seats.
#[test]
#[ignore]
fn champion_head_to_head_table() {
    let library = StrategyLibrary::extended();
    for name in library.names() {
        if name == CHAMPION {
            continue;
        }
        let mut gen = RandomRowGenerator::new(7, GeneratorParams::default()).unwrap();
        let result = run_arena(&library, CHAMPION, name, &mut gen, 2000, true, None).unwrap();
        println!(
            "  {:>16}: champion win rate {:5.1}%  draws {:4}  avg {:5.1} vs {:5.1}",
            name,
            result.win_rate(CHAMPION) * 100.0,
            result.draws(),
            result.avg_score(CHAMPION),
            result.avg_score(name),
        );
        assert_eq!(result.wins(CHAMPION) + result.wins(name) + result.draws(), 2000);
    }
}
