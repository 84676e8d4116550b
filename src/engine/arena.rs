//! Regression harness and head-to-head arena.
//!
//! The harness plays the champion (first seat) against every library
//! strategy (second seat) on each generated row and flags any row where the
//! champion scores less. The arena compares two named strategies over many
//! rows and aggregates the results.

use rayon::prelude::*;

use crate::engine::bot_strategy::{BotStrategy, StrategyLibrary};
use crate::engine::error::{HarnessError, RegressionFailure};
use crate::engine::generator::RowGenerator;
use crate::engine::models::*;
use crate::engine::reporter::Reporter;
use crate::engine::row::Row;
use crate::engine::simulator::play_match;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionOptions {
    pub trials: usize,
    /// Play trials on the rayon pool. Records are still reported in order.
    pub parallel: bool,
    /// Stop at the first champion loss instead of collecting every loss.
    pub halt_on_failure: bool,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self { trials: 9999, parallel: false, halt_on_failure: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegressionSummary {
    pub trials: usize,
    pub records: usize,
    pub failures: Vec<RegressionFailure>,
}

impl RegressionSummary {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first_failure(&self) -> Option<&RegressionFailure> {
        self.failures.first()
    }
}

/// Play one row against every library strategy, champion first.
pub fn play_trial(
    library: &StrategyLibrary,
    champion: &str,
    trial: usize,
    row: &[u32],
) -> Result<TrialReport, HarnessError> {
    let champion_strategy = library
        .get(champion)
        .ok_or_else(|| HarnessError::UnknownStrategy(champion.to_string()))?;
    Ok(play_trial_with(library, champion_strategy, trial, row))
}

fn play_trial_with(
    library: &StrategyLibrary,
    champion: &dyn BotStrategy,
    trial: usize,
    row: &[u32],
) -> TrialReport {
    let pots = Row::new(row.to_vec());
    let records = library
        .iter()
        .map(|entry| {
            let result = play_match(pots.clone(), champion, entry.strategy.as_ref());
            MatchRecord {
                trial,
                challenger: entry.name.to_string(),
                champion_score: result.first_score,
                challenger_score: result.second_score,
                champion_held: result.first_score >= result.second_score,
            }
        })
        .collect();
    TrialReport { trial, row: row.to_vec(), records }
}

/// Run the regression harness.
///
/// Rows are drawn from `generator` one per trial and must be non-empty and
/// of even length. Every record goes to `reporter` in trial order, then
/// library order. With `halt_on_failure` the first champion loss is returned
/// as [`HarnessError::ChampionLost`]; otherwise losses are collected into the
/// summary. The reporter is finished on every path after the rows are drawn,
/// and an output error it reports fails the run with [`HarnessError::Report`].
pub fn run_regression(
    library: &StrategyLibrary,
    champion: &str,
    generator: &mut dyn RowGenerator,
    reporter: &mut dyn Reporter,
    options: &RegressionOptions,
) -> Result<RegressionSummary, HarnessError> {
    let champion_strategy = library
        .get(champion)
        .ok_or_else(|| HarnessError::UnknownStrategy(champion.to_string()))?;

    let mut rows = Vec::with_capacity(options.trials);
    for trial in 0..options.trials {
        let row = generator.generate();
        if row.is_empty() || row.len() % 2 != 0 {
            return Err(HarnessError::InvalidRow { trial, len: row.len() });
        }
        rows.push(row);
    }

    tracing::info!(
        champion,
        trials = options.trials,
        challengers = library.len(),
        parallel = options.parallel,
        "starting regression run"
    );

    let mut summary = RegressionSummary::default();
    let outcome = record_all(library, champion_strategy, champion, &rows, reporter, options, &mut summary);
    let finished = reporter.finish();
    outcome?;
    finished?;

    tracing::info!(
        trials = summary.trials,
        records = summary.records,
        failures = summary.failures.len(),
        "regression run finished"
    );
    Ok(summary)
}

fn record_all(
    library: &StrategyLibrary,
    champion_strategy: &dyn BotStrategy,
    champion: &str,
    rows: &[Vec<u32>],
    reporter: &mut dyn Reporter,
    options: &RegressionOptions,
    summary: &mut RegressionSummary,
) -> Result<(), HarnessError> {
    if options.parallel {
        let reports: Vec<TrialReport> = rows
            .par_iter()
            .enumerate()
            .map(|(trial, row)| play_trial_with(library, champion_strategy, trial, row))
            .collect();
        for report in &reports {
            record_trial(report, champion, reporter, options, summary)?;
        }
    } else {
        for (trial, row) in rows.iter().enumerate() {
            let report = play_trial_with(library, champion_strategy, trial, row);
            record_trial(&report, champion, reporter, options, summary)?;
        }
    }
    Ok(())
}

fn record_trial(
    report: &TrialReport,
    champion: &str,
    reporter: &mut dyn Reporter,
    options: &RegressionOptions,
    summary: &mut RegressionSummary,
) -> Result<(), HarnessError> {
    reporter.on_trial(report.trial, &report.row);
    summary.trials += 1;
    for record in &report.records {
        reporter.on_record(record);
        summary.records += 1;
        if record.champion_held {
            continue;
        }
        let failure = RegressionFailure {
            trial: report.trial,
            row: report.row.clone(),
            champion: champion.to_string(),
            challenger: record.challenger.clone(),
            champion_score: record.champion_score,
            challenger_score: record.challenger_score,
        };
        tracing::warn!(
            trial = failure.trial,
            challenger = %failure.challenger,
            row = ?failure.row,
            "champion lost"
        );
        if options.halt_on_failure {
            return Err(failure.into());
        }
        summary.failures.push(failure);
    }
    Ok(())
}

// ================================================================== //
//  Head-to-head arena
// ================================================================== //

/// One arena game and the seat the first-named strategy played in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaGame {
    pub a_seat: Seat,
    pub result: MatchResult,
}

/// Every game of an arena run between `names[0]` and `names[1]`. All
/// statistics are derived from the recorded match results.
#[derive(Debug, Clone)]
pub struct ArenaResult {
    pub names: [String; 2],
    pub games: Vec<ArenaGame>,
}

impl ArenaResult {
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    fn seat_of(&self, name: &str, game: &ArenaGame) -> Option<Seat> {
        if name == self.names[0] {
            Some(game.a_seat)
        } else if name == self.names[1] {
            Some(game.a_seat.other())
        } else {
            None
        }
    }

    /// Per-game pot totals for `name`, in game order.
    pub fn scores(&self, name: &str) -> Vec<u64> {
        self.games
            .iter()
            .filter_map(|g| self.seat_of(name, g).map(|seat| g.result.score(seat)))
            .collect()
    }

    pub fn wins(&self, name: &str) -> usize {
        self.games
            .iter()
            .filter(|g| matches!((self.seat_of(name, g), g.result.winner()), (Some(s), Some(w)) if s == w))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.games.iter().filter(|g| g.result.winner().is_none()).count()
    }

    /// Games won by whoever moved first, regardless of strategy.
    pub fn first_seat_wins(&self) -> usize {
        self.games
            .iter()
            .filter(|g| g.result.winner() == Some(Seat::First))
            .count()
    }

    pub fn win_rate(&self, name: &str) -> f64 {
        self.wins(name) as f64 / self.num_games().max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        let scores = self.scores(name);
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<u64>() as f64 / scores.len() as f64
    }

    /// Sample standard deviation of the per-game totals.
    pub fn score_stddev(&self, name: &str) -> f64 {
        let scores = self.scores(name);
        if scores.len() < 2 {
            return 0.0;
        }
        let avg = self.avg_score(name);
        let sum_sq: f64 = scores.iter().map(|&s| (s as f64 - avg).powi(2)).sum();
        (sum_sq / (scores.len() - 1) as f64).sqrt()
    }

    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        wilson_interval(self.wins(name), self.num_games())
    }

    pub fn summary(&self) -> String {
        let n = self.num_games();
        let mut lines = vec![format!("Arena Results ({} games)", n)];
        lines.push("=".repeat(60));
        for name in &self.names {
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>16}: {:4} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  avg={:5.1} +/- {:4.1}",
                name,
                self.wins(name),
                self.win_rate(name) * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.avg_score(name),
                self.score_stddev(name),
            ));
        }
        lines.push(format!("  {:>16}: {}", "Draws", self.draws()));
        lines.push(format!("  {:>16}: {} of {}", "First seat won", self.first_seat_wins(), n));
        lines.join("\n")
    }
}

/// Wilson score interval at 95% for `successes` out of `n`.
fn wilson_interval(successes: usize, n: usize) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let n = n as f64;
    let p = successes as f64 / n;
    let z2 = 1.96_f64 * 1.96;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = (z2 * (p * (1.0 - p) / n + z2 / (4.0 * n * n))).sqrt() / denom;
    ((center - margin).max(0.0), (center + margin).min(1.0))
}

/// Play `num_games` rows between strategies `a` and `b`.
///
/// With `alternate_seats`, `b` moves first on odd-numbered games. The names
/// must differ, otherwise the two sides could not be told apart.
pub fn run_arena(
    library: &StrategyLibrary,
    a: &str,
    b: &str,
    generator: &mut dyn RowGenerator,
    num_games: usize,
    alternate_seats: bool,
    progress_callback: Option<&dyn Fn(usize, usize)>,
) -> Result<ArenaResult, HarnessError> {
    let strategy_a = library.get(a).ok_or_else(|| HarnessError::UnknownStrategy(a.to_string()))?;
    let strategy_b = library.get(b).ok_or_else(|| HarnessError::UnknownStrategy(b.to_string()))?;
    if a == b {
        return Err(HarnessError::SameStrategy(a.to_string()));
    }

    let mut result = ArenaResult {
        names: [a.to_string(), b.to_string()],
        games: Vec::with_capacity(num_games),
    };

    for game_idx in 0..num_games {
        let row = Row::new(generator.generate());
        let a_seat = if alternate_seats && game_idx % 2 == 1 { Seat::Second } else { Seat::First };
        let outcome = match a_seat {
            Seat::First => play_match(row, strategy_a, strategy_b),
            Seat::Second => play_match(row, strategy_b, strategy_a),
        };
        tracing::trace!(game = game_idx, ?a_seat, winner = ?outcome.winner(), "arena game");
        result.games.push(ArenaGame { a_seat, result: outcome });

        if let Some(cb) = progress_callback {
            cb(game_idx + 1, num_games);
        }
    }

    Ok(result)
}
