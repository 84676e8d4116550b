//! Greedy-continuation lookahead used by the deeper strategies.
//!
//! None of these are minimax. After the first simulated take, both sides are
//! assumed to keep taking the larger exposed end (ties to the right), which
//! is exactly what `maximize_all` and `minimize_enemy` score against.

use crate::engine::bot_strategy::{greedy_side, BotStrategy, MaximizeEqual};
use crate::engine::models::Side;
use crate::engine::row::RowView;

/// Net differential for the accumulating side when both players keep
/// taking the larger end. `mine` says whether the first ply of `view`
/// belongs to the accumulating side.
pub fn greedy_net(view: RowView<'_>, mine: bool) -> i64 {
    continuation_net(view, mine, greedy_side)
}

/// Total scored by the opponent under the greedy continuation.
pub fn greedy_opponent_total(view: RowView<'_>, opponent_to_move: bool) -> u64 {
    let mut view = view;
    let mut opponent = opponent_to_move;
    let mut total = 0u64;
    loop {
        let side = greedy_side(view);
        if opponent {
            total += view.take_value(side) as u64;
        }
        if view.len() == 1 {
            return total;
        }
        view = view.after(side);
        opponent = !opponent;
    }
}

/// Like [`greedy_net`], but every ply is chosen by `maximize_equal`.
///
/// Each ply may evaluate two further continuations, so this is
/// exponential in the view length.
pub fn self_play_net(view: RowView<'_>, mine: bool) -> i64 {
    continuation_net(view, mine, |v| MaximizeEqual.choose_side(v))
}

fn continuation_net(view: RowView<'_>, mine: bool, choose: impl Fn(RowView<'_>) -> Side) -> i64 {
    let mut view = view;
    let mut sign: i64 = if mine { 1 } else { -1 };
    let mut net = 0i64;
    loop {
        if view.len() == 1 {
            return net + sign * view.left_value() as i64;
        }
        let side = choose(view);
        net += sign * view.take_value(side) as i64;
        view = view.after(side);
        sign = -sign;
    }
}
