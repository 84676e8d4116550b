//! Error types for the harness and profile loading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The champion scored less than a challenger on a generated row.
///
/// Carries everything needed to replay the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error(
    "champion '{champion}' lost to '{challenger}' {champion_score}-{challenger_score} on trial {trial}, row {row:?}"
)]
pub struct RegressionFailure {
    pub trial: usize,
    pub row: Vec<u32>,
    pub champion: String,
    pub challenger: String,
    pub champion_score: u64,
    pub challenger_score: u64,
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
    #[error("generator produced an invalid row on trial {trial}: length {len} must be even and non-zero")]
    InvalidRow { trial: usize, len: usize },
    #[error("invalid generator settings: {0}")]
    InvalidGenerator(String),
    #[error("arena needs two distinct strategies, got '{0}' twice")]
    SameStrategy(String),
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
    #[error(transparent)]
    ChampionLost(#[from] RegressionFailure),
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("profile '{0}' not found")]
    NotFound(String),
}
