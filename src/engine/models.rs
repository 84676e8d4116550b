//! Core data types shared by the match engine, harness and reporters.

use serde::{Deserialize, Serialize};

/// Which end of the row a player takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Seat in a match. `First` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// One ply: who moved, which end they took, what it was worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub seat: Seat,
    pub side: Side,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub first_score: u64,
    pub second_score: u64,
    pub first_moves: usize,
    pub second_moves: usize,
    pub turns: Vec<Turn>,
}

impl MatchResult {
    pub fn score(&self, seat: Seat) -> u64 {
        match seat {
            Seat::First => self.first_score,
            Seat::Second => self.second_score,
        }
    }

    /// `None` on a draw.
    pub fn winner(&self) -> Option<Seat> {
        match self.first_score.cmp(&self.second_score) {
            std::cmp::Ordering::Greater => Some(Seat::First),
            std::cmp::Ordering::Less => Some(Seat::Second),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Outcome of the champion against one challenger on one generated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub trial: usize,
    pub challenger: String,
    pub champion_score: u64,
    pub challenger_score: u64,
    pub champion_held: bool,
}

/// Every record produced by one generated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    pub trial: usize,
    pub row: Vec<u32>,
    pub records: Vec<MatchRecord>,
}
