//! Row generators feeding the regression harness and the arena.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::error::HarnessError;

/// Source of rows. Harness rows must be non-empty and of even length.
pub trait RowGenerator {
    fn generate(&mut self) -> Vec<u32>;
}

/// Shape of randomly generated rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorParams {
    /// Smallest pot count drawn before rounding down to even.
    pub min_pots: usize,
    /// Largest pot count drawn before rounding down to even.
    pub max_pots: usize,
    /// Pot values are drawn from `1..=max_value`.
    pub max_value: u32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self { min_pots: 4, max_pots: 13, max_value: 9 }
    }
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.min_pots < 2 {
            return Err(HarnessError::InvalidGenerator(format!(
                "min_pots must be at least 2, got {}",
                self.min_pots
            )));
        }
        if self.min_pots > self.max_pots {
            return Err(HarnessError::InvalidGenerator(format!(
                "min_pots {} exceeds max_pots {}",
                self.min_pots, self.max_pots
            )));
        }
        if self.max_value == 0 {
            return Err(HarnessError::InvalidGenerator("max_value must be positive".into()));
        }
        Ok(())
    }
}

/// Seeded uniform generator: even pot counts, positive values.
pub struct RandomRowGenerator {
    rng: StdRng,
    params: GeneratorParams,
}

impl RandomRowGenerator {
    pub fn new(seed: u64, params: GeneratorParams) -> Result<Self, HarnessError> {
        params.validate()?;
        Ok(Self { rng: StdRng::seed_from_u64(seed), params })
    }
}

impl RowGenerator for RandomRowGenerator {
    fn generate(&mut self) -> Vec<u32> {
        let drawn = self.rng.gen_range(self.params.min_pots..=self.params.max_pots);
        let count = drawn - drawn % 2;
        (0..count)
            .map(|_| self.rng.gen_range(1..=self.params.max_value))
            .collect()
    }
}

/// Replays literal rows in order, wrapping around at the end.
pub struct FixedRowGenerator {
    rows: Vec<Vec<u32>>,
    next: usize,
}

impl FixedRowGenerator {
    /// Panics if `rows` is empty.
    pub fn new(rows: Vec<Vec<u32>>) -> Self {
        assert!(!rows.is_empty(), "FixedRowGenerator needs at least one row");
        Self { rows, next: 0 }
    }
}

impl RowGenerator for FixedRowGenerator {
    fn generate(&mut self) -> Vec<u32> {
        let row = self.rows[self.next].clone();
        self.next = (self.next + 1) % self.rows.len();
        row
    }
}

/// Parse a comma separated row such as `2,3,2,1,3,2`.
pub fn parse_row(text: &str) -> Result<Vec<u32>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().map_err(|e| format!("bad pot value '{}': {}", s, e)))
        .collect()
}
