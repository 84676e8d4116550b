//! End-to-end checks of the regression harness through the public API.
//!
//! Run with:
//!     cargo test --test regression

use proptest::prelude::*;

use pots_arena::engine::arena::{play_trial, run_regression, RegressionOptions};
use pots_arena::engine::bot_strategy::{AlwaysHighest, BotStrategy, StrategyLibrary, CHAMPION};
use pots_arena::engine::error::HarnessError;
use pots_arena::engine::generator::{FixedRowGenerator, GeneratorParams, RandomRowGenerator};
use pots_arena::engine::models::MatchRecord;
use pots_arena::engine::reporter::{CollectingReporter, JsonLinesReporter};
use pots_arena::engine::row::Row;
use pots_arena::engine::simulator::play_match;

const LOOKAHEAD: [&str; 7] = [
    "less_for_enemy",
    "more_for_enemy",
    "maximize_pair",
    "maximize_three",
    "maximize_all",
    "minimize_enemy",
    "maximize_equal",
];

fn record<'a>(records: &'a [MatchRecord], challenger: &str) -> &'a MatchRecord {
    records
        .iter()
        .find(|r| r.challenger == challenger)
        .unwrap_or_else(|| panic!("no record for {}", challenger))
}

#[test]
fn champion_beats_always_left_on_reference_row() {
    let library = StrategyLibrary::canonical();
    let report = play_trial(&library, CHAMPION, 0, &[2, 3, 2, 1, 3, 2]).unwrap();
    let left = record(&report.records, "always_left");
    assert_eq!((left.champion_score, left.challenger_score), (7, 6));
    assert!(left.champion_held);

    let right = record(&report.records, "always_right");
    assert_eq!((right.champion_score, right.challenger_score), (6, 7));
    assert!(!right.champion_held);

    for r in &report.records {
        assert_eq!(r.champion_score + r.challenger_score, 13, "{}", r.challenger);
    }
}

#[test]
fn harness_surfaces_reproducible_failure() {
    let library = StrategyLibrary::canonical();
    let rows = vec![vec![1, 1, 1, 1], vec![2, 3, 2, 1, 3, 2]];
    let mut gen = FixedRowGenerator::new(rows);
    let mut reporter = CollectingReporter::default();
    let options = RegressionOptions { trials: 2, ..Default::default() };

    let failure = match run_regression(&library, CHAMPION, &mut gen, &mut reporter, &options) {
        Err(HarnessError::ChampionLost(f)) => f,
        other => panic!("expected a champion loss, got {:?}", other.map(|s| s.trials)),
    };
    assert_eq!(failure.trial, 1);
    assert_eq!(failure.challenger, "always_right");
    assert_eq!(failure.champion, CHAMPION);

    // Replaying the reported row reproduces the exact scores.
    let challenger = library.get(&failure.challenger).unwrap();
    let champion = library.champion().unwrap();
    let replay = play_match(Row::from(failure.row.clone()), champion, challenger);
    assert_eq!(replay.first_score, failure.champion_score);
    assert_eq!(replay.second_score, failure.challenger_score);

    // Trial 0 fully reported, trial 1 up to and including the failure.
    assert_eq!(reporter.rows.len(), 2);
    assert_eq!(reporter.records.len(), library.len() + 2);
}

#[test]
fn harness_passes_on_rows_the_champion_cannot_lose() {
    let library = StrategyLibrary::extended();
    let rows = vec![vec![1, 1, 1, 1], vec![9, 1, 1, 1], vec![4, 4]];
    let mut gen = FixedRowGenerator::new(rows);
    let mut reporter = CollectingReporter::default();
    let options = RegressionOptions { trials: 3, ..Default::default() };
    let summary = run_regression(&library, CHAMPION, &mut gen, &mut reporter, &options).unwrap();
    assert!(summary.passed());
    assert_eq!(summary.trials, 3);
    assert_eq!(summary.records, 3 * library.len());
    assert!(reporter.records.iter().all(|r| r.champion_held));
}

#[test]
fn harness_runs_are_reproducible() {
    let library = StrategyLibrary::canonical();
    let run = || {
        let mut gen = RandomRowGenerator::new(99, GeneratorParams::default()).unwrap();
        let mut out = JsonLinesReporter::new(Vec::new());
        let options = RegressionOptions { trials: 300, parallel: false, halt_on_failure: false };
        let summary = run_regression(&library, CHAMPION, &mut gen, &mut out, &options).unwrap();
        (summary, out.into_inner().unwrap())
    };
    let (a, a_lines) = run();
    let (b, b_lines) = run();
    assert_eq!(a, b);
    assert_eq!(a_lines, b_lines);
    assert_eq!(a.trials, 300);
}

#[test]
fn odd_rows_give_second_seat_floor_half_moves() {
    let library = StrategyLibrary::canonical();
    for n in [1usize, 3, 5, 9, 13] {
        let pots: Vec<u32> = (1..=n as u32).collect();
        for entry in library.iter() {
            let result = play_match(Row::from(pots.clone()), library.champion().unwrap(), entry.strategy.as_ref());
            assert_eq!(result.first_moves, (n + 1) / 2);
            assert_eq!(result.second_moves, n / 2);
        }
    }
}

proptest! {
    #[test]
    fn scores_are_conserved(
        pots in prop::collection::vec(0u32..1000, 1..40),
        a in 0usize..10,
        b in 0usize..10,
    ) {
        let library = StrategyLibrary::canonical();
        let entries: Vec<_> = library.iter().collect();
        let total: u64 = pots.iter().map(|&v| v as u64).sum();
        let result = play_match(Row::from(pots), entries[a].strategy.as_ref(), entries[b].strategy.as_ref());
        prop_assert_eq!(result.first_score + result.second_score, total);
        prop_assert_eq!(result.turns.len(), result.first_moves + result.second_moves);
    }

    #[test]
    fn lookahead_falls_back_to_highest_on_short_views(
        pots in prop::collection::vec(0u32..20, 1..=3),
    ) {
        let library = StrategyLibrary::extended();
        let row = Row::from(pots);
        let expected = AlwaysHighest.choose_side(row.view());
        for name in LOOKAHEAD {
            prop_assert_eq!(library.get(name).unwrap().choose_side(row.view()), expected);
        }
    }

    #[test]
    fn strategies_are_pure(pots in prop::collection::vec(1u32..10, 4..14)) {
        let library = StrategyLibrary::extended();
        let a = Row::from(pots.clone());
        let b = Row::from(pots);
        for entry in library.iter() {
            prop_assert_eq!(entry.strategy.choose_side(a.view()), entry.strategy.choose_side(b.view()));
        }
    }
}
