/// The value of a node in the game tree
///
/// Higher is better for the protagonist. [BEST_POSSIBLE_SCORE] marks a certain win and
/// [WORST_POSSIBLE_SCORE] a certain loss.
pub type Value = f64;

/// No [Value] can be higher than this, it is what a won game is worth
pub const BEST_POSSIBLE_SCORE: Value = f64::INFINITY;

/// No [Value] can be lower than this, it is what a lost game is worth
pub const WORST_POSSIBLE_SCORE: Value = f64::NEG_INFINITY;

/// This trait is used to control something that can return a score from a game state
///
/// The search only calls this at cutoff nodes, either because it reached the maximum depth or
/// because the game is over. Implementations must never return `NaN`.
///
/// Any `Fn(&GameType) -> f64` implements this trait, so plain functions and closures can be used
/// directly.
pub trait Scorable<GameType> {
    /// Convert the given game state into a [Value]
    fn score(&self, game: &GameType) -> Value;
}

impl<GameType, FnLike: Fn(&GameType) -> Value> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> Value {
        (self)(game)
    }
}
