//! Ghost policies used when actually playing a game
//!
//! The searches never call these, to them every ghost is either a minimizer or a uniform
//! random mover.

use itertools::Itertools;
use multiagent_minimax::{AgentIndex, SearchError};
use parking_lot::Mutex;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{AgentError, Direction, GameState, GhostAgent};

fn legal_actions(state: &GameState, agent: AgentIndex) -> Result<Vec<Direction>, AgentError> {
    let actions = state.legal_agent_actions(agent);
    if actions.is_empty() {
        return Err(SearchError::NoLegalActions { agent }.into());
    }

    Ok(actions)
}

/// Picks uniformly among the legal actions
#[derive(Debug)]
pub struct RandomGhost {
    rng: Mutex<StdRng>,
}

impl RandomGhost {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomGhost {
    fn default() -> Self {
        Self::new()
    }
}

impl GhostAgent for RandomGhost {
    fn decide(&self, state: &GameState, agent: AgentIndex) -> Result<Direction, AgentError> {
        let actions = legal_actions(state, agent)?;

        Ok(*actions
            .choose(&mut *self.rng.lock())
            .unwrap_or(&Direction::Stop))
    }
}

/// Chases Pacman, or runs away while scared
///
/// With probability [DirectionalGhost::preference] it picks among the moves that get closest to
/// (or furthest from) Pacman, otherwise it moves uniformly at random.
#[derive(Debug)]
pub struct DirectionalGhost {
    pub preference: f64,
    rng: Mutex<StdRng>,
}

impl DirectionalGhost {
    pub const DEFAULT_PREFERENCE: f64 = 0.8;

    pub fn new() -> Self {
        Self {
            preference: Self::DEFAULT_PREFERENCE,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            preference: Self::DEFAULT_PREFERENCE,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// The moves this ghost would rather make, in enumeration order
    pub fn preferred_actions(&self, state: &GameState, agent: AgentIndex) -> Vec<Direction> {
        let Some(ghost) = agent.checked_sub(1).and_then(|ghost| state.ghosts.get(ghost)) else {
            return vec![];
        };
        let actions = state.legal_agent_actions(agent);

        let distances = actions.into_iter().map(|action| {
            let next = ghost.position.neighbor(action);
            (action, next.manhattan_distance(&state.pacman))
        });

        let best = if ghost.is_scared() {
            distances.max_set_by_key(|(_, distance)| *distance)
        } else {
            distances.min_set_by_key(|(_, distance)| *distance)
        };

        best.into_iter().map(|(action, _)| action).collect()
    }
}

impl Default for DirectionalGhost {
    fn default() -> Self {
        Self::new()
    }
}

impl GhostAgent for DirectionalGhost {
    fn decide(&self, state: &GameState, agent: AgentIndex) -> Result<Direction, AgentError> {
        let actions = legal_actions(state, agent)?;
        let preferred = self.preferred_actions(state, agent);

        let mut rng = self.rng.lock();
        let pool = if !preferred.is_empty() && rng.gen_bool(self.preference.clamp(0.0, 1.0)) {
            &preferred
        } else {
            &actions
        };

        Ok(*pool.choose(&mut *rng).unwrap_or(&Direction::Stop))
    }
}
