//! Synchronous match simulator: two players alternate on one row until it
//! is empty.

use crate::engine::bot_strategy::BotStrategy;
use crate::engine::models::*;
use crate::engine::row::Row;

/// A strategy bound to a running score for one match.
pub struct Player<'s> {
    seat: Seat,
    strategy: &'s dyn BotStrategy,
    score: u64,
    moves: usize,
}

impl<'s> Player<'s> {
    pub fn new(seat: Seat, strategy: &'s dyn BotStrategy) -> Self {
        Self { seat, strategy, score: 0, moves: 0 }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Asks the strategy for a side on the row as it stands, takes that pot
    /// and credits it. The row must not be empty.
    pub fn take_turn(&mut self, row: &mut Row) -> Turn {
        let side = self.strategy.choose_side(row.view());
        let value = row.take(side);
        self.score += value as u64;
        self.moves += 1;
        tracing::trace!(seat = ?self.seat, ?side, value, score = self.score, "move");
        Turn { seat: self.seat, side, value }
    }
}

/// Play `row` to completion. `first` moves first; play stops as soon as the
/// row empties, so on odd rows `second` moves one time fewer.
pub fn play_match(mut row: Row, first: &dyn BotStrategy, second: &dyn BotStrategy) -> MatchResult {
    let mut players = [Player::new(Seat::First, first), Player::new(Seat::Second, second)];
    let mut turns = Vec::with_capacity(row.len());
    let mut active = Seat::First;

    while !row.is_empty() {
        let player = match active {
            Seat::First => &mut players[0],
            Seat::Second => &mut players[1],
        };
        turns.push(player.take_turn(&mut row));
        active = active.other();
    }

    let [a, b] = players;
    MatchResult {
        first_score: a.score(),
        second_score: b.score(),
        first_moves: a.moves(),
        second_moves: b.moves(),
        turns,
    }
}
