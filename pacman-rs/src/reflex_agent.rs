use decorum::N64;
use multiagent_minimax::{SearchError, Value, PROTAGONIST};
use parking_lot::Mutex;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{eval::reflex_evaluation, AgentError, Direction, GameState, PacmanAgent};

/// Looks exactly one Pacman move ahead and takes the best looking one
///
/// Unlike the searches, ties are broken uniformly at random.
#[derive(Debug)]
pub struct ReflexAgent {
    rng: Mutex<StdRng>,
}

impl Default for ReflexAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflexAgent {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// The same seed and the same states always produce the same moves
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Every legal action with its one step score
    pub fn scores(&self, state: &GameState) -> Vec<(Direction, Value)> {
        state
            .legal_pacman_actions()
            .into_iter()
            .map(|action| (action, reflex_evaluation(state, action)))
            .collect()
    }

    /// The actions sharing the highest score, in enumeration order
    pub fn best_actions(&self, state: &GameState) -> Vec<Direction> {
        let scores = self.scores(state);
        let Some(best) = scores.iter().map(|(_, score)| N64::from(*score)).max() else {
            return vec![];
        };

        scores
            .into_iter()
            .filter(|(_, score)| N64::from(*score) == best)
            .map(|(action, _)| action)
            .collect()
    }
}

impl PacmanAgent for ReflexAgent {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn decide(&self, state: &GameState) -> Result<Direction, AgentError> {
        let best = self.best_actions(state);

        let action = best
            .choose(&mut *self.rng.lock())
            .copied()
            .ok_or(SearchError::NoLegalActions { agent: PROTAGONIST })?;
        debug!(%action, tied = best.len(), "reflex move");

        Ok(action)
    }
}
