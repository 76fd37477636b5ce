//! The search variants and the [MinimaxSearch] struct that ties them to a scoring function
//!
//! All variants share the same recursion: the protagonist (agent 0) picks the child with the
//! highest value, and the variants only differ in how adversaries are modelled.
//!
//! - [Algorithm::Minimax] assumes every adversary picks the child with the lowest value. This is
//!   the `paranoid` view of a multiplayer game, all opponents work together against you
//! - [Algorithm::AlphaBeta] makes the same assumption but skips subtrees that can't change the
//!   outcome. It always returns the same action and value as [Algorithm::Minimax]
//! - [Algorithm::Expectimax] treats every adversary as picking uniformly at random, so their
//!   nodes are worth the average of their children
//!
//! When several root actions end up with the same value, every variant returns the one that
//! came first in [crate::AdversarialGame::legal_actions].

use std::{fmt::Display, str::FromStr};

pub mod alpha_beta;
pub mod expectimax;
pub mod minimax;

mod context;
pub use context::{SearchContext, SearchStats};

mod engine;
pub use engine::{MinimaxSearch, SearchOptions};

mod search_return;
pub use search_return::SearchReturn;

pub(crate) use search_return::BestAction;

/// Which search to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Plain minimax, adversaries minimize
    Minimax,
    /// Minimax with Alpha-Beta pruning
    AlphaBeta,
    /// Adversaries move uniformly at random
    Expectimax,
}

impl Algorithm {
    /// Every algorithm, in the order they are usually listed
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Minimax,
        Algorithm::AlphaBeta,
        Algorithm::Expectimax,
    ];

    /// The name used in logs and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha-beta",
            Algorithm::Expectimax => "expectimax",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returned when a string doesn't name an [Algorithm]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(Algorithm::Minimax),
            "alpha-beta" | "alphabeta" | "alphaBeta" => Ok(Algorithm::AlphaBeta),
            "expectimax" => Ok(Algorithm::Expectimax),
            other => Err(UnknownAlgorithm(other.to_owned())),
        }
    }
}
