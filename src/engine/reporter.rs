//! Reporters receive every generated row and every match record the
//! regression harness produces.

use std::io::Write;

use serde::Serialize;

use crate::engine::models::MatchRecord;

pub trait Reporter {
    fn on_trial(&mut self, trial: usize, row: &[u32]);
    fn on_record(&mut self, record: &MatchRecord);

    /// Called once after the last record. Surfaces any output error the
    /// reporter swallowed while recording.
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Discards everything.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_trial(&mut self, _trial: usize, _row: &[u32]) {}
    fn on_record(&mut self, _record: &MatchRecord) {}
}

/// Emits `tracing` events: rows at debug, held records at info, losses at warn.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn on_trial(&mut self, trial: usize, row: &[u32]) {
        tracing::debug!(trial, ?row, "generated row");
    }

    fn on_record(&mut self, record: &MatchRecord) {
        if record.champion_held {
            tracing::info!(
                trial = record.trial,
                challenger = %record.challenger,
                champion = record.champion_score,
                opponent = record.challenger_score,
                "wins"
            );
        } else {
            tracing::warn!(
                trial = record.trial,
                challenger = %record.challenger,
                champion = record.champion_score,
                opponent = record.challenger_score,
                "FAIL"
            );
        }
    }
}

#[derive(Serialize)]
struct TrialLine<'a> {
    trial: usize,
    row: &'a [u32],
}

/// Writes one JSON object per line. Write errors are logged and the first
/// one is kept; [`Reporter::finish`] and `into_inner` hand it back.
pub struct JsonLinesReporter<W: Write> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn into_inner(self) -> Result<W, std::io::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn write_line<T: Serialize>(&mut self, value: &T) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, value)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write JSON record");
            self.error = Some(e);
        }
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn on_trial(&mut self, trial: usize, row: &[u32]) {
        self.write_line(&TrialLine { trial, row });
    }

    fn on_record(&mut self, record: &MatchRecord) {
        self.write_line(record);
    }

    fn finish(&mut self) -> std::io::Result<()> {
        if let Some(e) = &self.error {
            return Err(std::io::Error::new(e.kind(), e.to_string()));
        }
        self.out.flush()
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub rows: Vec<(usize, Vec<u32>)>,
    pub records: Vec<MatchRecord>,
}

impl Reporter for CollectingReporter {
    fn on_trial(&mut self, trial: usize, row: &[u32]) {
        self.rows.push((trial, row.to_vec()));
    }

    fn on_record(&mut self, record: &MatchRecord) {
        self.records.push(record.clone());
    }
}
