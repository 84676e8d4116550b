//! The row of pots and read-only views into it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::engine::models::Side;

/// Mutable game state: pots can only leave from either end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pots: VecDeque<u32>,
}

impl Row {
    pub fn new(pots: Vec<u32>) -> Self {
        Self { pots: pots.into() }
    }

    pub fn len(&self) -> usize {
        self.pots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pots.is_empty()
    }

    /// Sum of the pots still in the row.
    pub fn total(&self) -> u64 {
        self.pots.iter().map(|&v| v as u64).sum()
    }

    pub fn as_vec(&self) -> Vec<u32> {
        self.pots.iter().copied().collect()
    }

    /// Removes and returns the leftmost pot. Panics on an empty row.
    pub fn take_left(&mut self) -> u32 {
        self.pots
            .pop_front()
            .unwrap_or_else(|| panic!("take_left called on an empty row"))
    }

    /// Removes and returns the rightmost pot. Panics on an empty row.
    pub fn take_right(&mut self) -> u32 {
        self.pots
            .pop_back()
            .unwrap_or_else(|| panic!("take_right called on an empty row"))
    }

    pub fn take(&mut self, side: Side) -> u32 {
        match side {
            Side::Left => self.take_left(),
            Side::Right => self.take_right(),
        }
    }

    /// View over every live pot. Panics on an empty row.
    pub fn view(&self) -> RowView<'_> {
        assert!(!self.pots.is_empty(), "cannot view an empty row");
        RowView {
            pots: &self.pots,
            left: 0,
            right: self.pots.len() - 1,
        }
    }
}

impl From<Vec<u32>> for Row {
    fn from(pots: Vec<u32>) -> Self {
        Self::new(pots)
    }
}

impl FromIterator<u32> for Row {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            pots: iter.into_iter().collect(),
        }
    }
}

/// Read-only inclusive sub-range `[left, right]` of a row.
///
/// Lookahead strategies narrow a view to simulate takes without touching
/// the row itself. A view is never empty.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pots: &'a VecDeque<u32>,
    left: usize,
    right: usize,
}

impl<'a> RowView<'a> {
    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }

    /// Value at an absolute index of the underlying row.
    pub fn value(&self, index: usize) -> u32 {
        debug_assert!(index >= self.left && index <= self.right);
        self.pots[index]
    }

    pub fn left_value(&self) -> u32 {
        self.pots[self.left]
    }

    pub fn right_value(&self) -> u32 {
        self.pots[self.right]
    }

    pub fn take_value(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_value(),
            Side::Right => self.right_value(),
        }
    }

    /// The view left behind once the leftmost pot is taken.
    pub fn after_left(&self) -> RowView<'a> {
        assert!(self.left < self.right, "cannot narrow a single-pot view");
        RowView {
            left: self.left + 1,
            ..*self
        }
    }

    /// The view left behind once the rightmost pot is taken.
    pub fn after_right(&self) -> RowView<'a> {
        assert!(self.left < self.right, "cannot narrow a single-pot view");
        RowView {
            right: self.right - 1,
            ..*self
        }
    }

    pub fn after(&self, side: Side) -> RowView<'a> {
        match side {
            Side::Left => self.after_left(),
            Side::Right => self.after_right(),
        }
    }
}
