//! Bot strategy trait, the named policies, and the library that orders them.

use crate::engine::evaluator::{greedy_net, greedy_opponent_total, self_play_net};
use crate::engine::models::Side;
use crate::engine::row::RowView;

/// Views shorter than this fall back to `always_highest`.
pub const LOOKAHEAD_MIN_POTS: usize = 4;

/// Name of the strategy every other strategy is regression-tested against.
pub const CHAMPION: &str = "maximize_all";

/// A bot strategy picks which end of the row to take.
///
/// Implementations are stateless: the same view always yields the same side.
pub trait BotStrategy: Send + Sync {
    fn choose_side(&self, view: RowView<'_>) -> Side;
}

/// Larger end wins, ties go right.
pub fn greedy_side(view: RowView<'_>) -> Side {
    if view.left_value() > view.right_value() {
        Side::Left
    } else {
        Side::Right
    }
}

/// `Left` when the left estimate is strictly better, otherwise `Right`.
fn prefer_left_if(better: bool) -> Side {
    if better {
        Side::Left
    } else {
        Side::Right
    }
}

/// Best single pot the opponent can take after each of my two choices.
fn opponent_best_reply(view: RowView<'_>) -> (u32, u32) {
    let (l, r) = (view.left(), view.right());
    let if_left = view.value(l + 1).max(view.value(r));
    let if_right = view.value(l).max(view.value(r - 1));
    (if_left, if_right)
}

pub struct AlwaysLeft;

impl BotStrategy for AlwaysLeft {
    fn choose_side(&self, _view: RowView<'_>) -> Side {
        Side::Left
    }
}

pub struct AlwaysRight;

impl BotStrategy for AlwaysRight {
    fn choose_side(&self, _view: RowView<'_>) -> Side {
        Side::Right
    }
}

pub struct AlwaysLowest;

impl BotStrategy for AlwaysLowest {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        prefer_left_if(view.left_value() < view.right_value())
    }
}

pub struct AlwaysHighest;

impl BotStrategy for AlwaysHighest {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        greedy_side(view)
    }
}

/// Leaves the opponent the smaller best reply.
pub struct LessForEnemy;

impl BotStrategy for LessForEnemy {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let (l, r) = opponent_best_reply(view);
        prefer_left_if(l < r)
    }
}

/// Leaves the opponent the larger best reply. A deliberately weak baseline.
pub struct MoreForEnemy;

impl BotStrategy for MoreForEnemy {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let (l, r) = opponent_best_reply(view);
        prefer_left_if(l > r)
    }
}

/// My take minus the opponent's best reply.
pub struct MaximizePair;

impl BotStrategy for MaximizePair {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let (reply_l, reply_r) = opponent_best_reply(view);
        let l = view.left_value() as i64 - reply_l as i64;
        let r = view.right_value() as i64 - reply_r as i64;
        prefer_left_if(l > r)
    }
}

/// My take, minus the opponent's greedy reply, plus my best pot after that.
pub struct MaximizeThree;

impl MaximizeThree {
    fn score(view: RowView<'_>, side: Side) -> i64 {
        let mine = view.take_value(side) as i64;
        let rest = view.after(side);
        let (l, r) = (rest.left(), rest.right());
        let (reply, after_reply) = if rest.left_value() > rest.right_value() {
            (rest.left_value(), view.value(l + 1).max(view.value(r)))
        } else {
            (rest.right_value(), view.value(l).max(view.value(r - 1)))
        };
        mine - reply as i64 + after_reply as i64
    }
}

impl BotStrategy for MaximizeThree {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let l = Self::score(view, Side::Left);
        let r = Self::score(view, Side::Right);
        prefer_left_if(l > r)
    }
}

/// My take plus the greedy-continuation net over everything left.
pub struct MaximizeAll;

impl BotStrategy for MaximizeAll {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let l = view.left_value() as i64 + greedy_net(view.after_left(), false);
        let r = view.right_value() as i64 + greedy_net(view.after_right(), false);
        prefer_left_if(l > r)
    }
}

/// Smallest projected opponent total under the greedy continuation.
pub struct MinimizeEnemy;

impl BotStrategy for MinimizeEnemy {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let l = greedy_opponent_total(view.after_left(), true);
        let r = greedy_opponent_total(view.after_right(), true);
        prefer_left_if(l < r)
    }
}

/// `maximize_all` with self-play continuations; equal estimates defer to
/// `always_highest`.
pub struct MaximizeEqual;

impl BotStrategy for MaximizeEqual {
    fn choose_side(&self, view: RowView<'_>) -> Side {
        if view.len() < LOOKAHEAD_MIN_POTS {
            return greedy_side(view);
        }
        let l = view.left_value() as i64 + self_play_net(view.after_left(), false);
        let r = view.right_value() as i64 + self_play_net(view.after_right(), false);
        if l == r {
            return greedy_side(view);
        }
        prefer_left_if(l > r)
    }
}

/// A strategy and the stable name used to report it.
pub struct StrategyEntry {
    pub name: &'static str,
    pub strategy: Box<dyn BotStrategy>,
}

/// Ordered table of named strategies.
pub struct StrategyLibrary {
    entries: Vec<StrategyEntry>,
}

impl StrategyLibrary {
    /// The ten strategies the regression harness plays by default.
    pub fn canonical() -> Self {
        let mut library = Self { entries: Vec::new() };
        library.register("always_left", Box::new(AlwaysLeft));
        library.register("always_right", Box::new(AlwaysRight));
        library.register("always_lowest", Box::new(AlwaysLowest));
        library.register("always_highest", Box::new(AlwaysHighest));
        library.register("less_for_enemy", Box::new(LessForEnemy));
        library.register("more_for_enemy", Box::new(MoreForEnemy));
        library.register("maximize_pair", Box::new(MaximizePair));
        library.register("maximize_three", Box::new(MaximizeThree));
        library.register("maximize_all", Box::new(MaximizeAll));
        library.register("minimize_enemy", Box::new(MinimizeEnemy));
        library
    }

    /// Canonical library plus `maximize_equal`.
    pub fn extended() -> Self {
        let mut library = Self::canonical();
        library.register("maximize_equal", Box::new(MaximizeEqual));
        library
    }

    /// Appends a strategy. A name that is already taken replaces the old entry
    /// in place.
    pub fn register(&mut self, name: &'static str, strategy: Box<dyn BotStrategy>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.strategy = strategy,
            None => self.entries.push(StrategyEntry { name, strategy }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn BotStrategy> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.strategy.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn champion(&self) -> Option<&dyn BotStrategy> {
        self.get(CHAMPION)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
