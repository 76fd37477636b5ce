#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements depth-limited adversarial search for turn based games with one
//! protagonist and any number of adversaries. You provide a game that implements
//! [AdversarialGame] and a 'scoring' function that turns a game state into an `f64`, and the
//! search picks the protagonist's next action.
//!
//! Three variants are supported, see [search::Algorithm]:
//!
//! - Minimax, where every adversary works to minimize the protagonist's score
//! - Minimax with Alpha-Beta pruning, which returns the same results while visiting fewer nodes
//! - Expectimax, where every adversary picks uniformly at random among its legal actions
//!
//! ```rust
//! use multiagent_minimax::{search::{Algorithm, MinimaxSearch}, AdversarialGame, AgentIndex};
//!
//! // A tiny game where the protagonist picks a number and the single adversary gets to
//! // subtract one or two from it
//! #[derive(Debug, Clone)]
//! struct Countdown {
//!     value: i32,
//! }
//!
//! impl AdversarialGame for Countdown {
//!     type Action = i32;
//!
//!     fn legal_actions(&self, agent: AgentIndex) -> Vec<i32> {
//!         if agent == 0 { vec![1, 2, 3] } else { vec![-1, -2] }
//!     }
//!
//!     fn successor(&self, _agent: AgentIndex, action: &i32) -> Self {
//!         Countdown { value: self.value + action }
//!     }
//!
//!     fn num_agents(&self) -> usize { 2 }
//!     fn is_win(&self) -> bool { false }
//!     fn is_lose(&self) -> bool { false }
//!     fn score(&self) -> f64 { self.value as f64 }
//! }
//!
//! fn score_function(game: &Countdown) -> f64 { game.score() }
//!
//! let search = MinimaxSearch::new(Algorithm::AlphaBeta, 1, &score_function);
//! let result = search.choose_action(&Countdown { value: 0 }).unwrap();
//!
//! assert_eq!(result.action, 3);
//! assert_eq!(result.value, 1.0);
//! ```

mod error;
pub use error::SearchError;

mod game;
pub use game::{AdversarialGame, AgentIndex, PROTAGONIST};

mod score;
pub use score::{Scorable, Value, BEST_POSSIBLE_SCORE, WORST_POSSIBLE_SCORE};

pub mod search;
pub mod turn;

#[cfg(test)]
mod test_tree;
