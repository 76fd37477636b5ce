use multiagent_minimax::search::{MinimaxSearch, SearchOptions, SearchReturn};
use tracing::{debug, info};

use crate::{
    options::{AgentOptions, ConfigError, EvaluationKind, StateEvaluator},
    AgentError, Direction, GameState, PacmanAgent,
};

/// Plays Pacman by searching a fixed number of rounds ahead
///
/// The algorithm, depth and scoring function are fixed when the agent is built. Every call to
/// [PacmanAgent::decide] runs a fresh, independent search from the given state.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    search: MinimaxSearch<GameState, StateEvaluator>,
    evaluation: EvaluationKind,
}

impl SearchAgent {
    pub fn new(options: &AgentOptions) -> Result<Self, ConfigError> {
        Self::new_with_search_options(options, Default::default())
    }

    pub fn new_with_search_options(
        options: &AgentOptions,
        search_options: SearchOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;

        let algorithm = options
            .algorithm
            .search_algorithm()
            .ok_or_else(|| ConfigError::UnknownAlgorithm(options.algorithm.name().to_owned()))?;
        let evaluator = options
            .evaluation
            .state_evaluator()
            .ok_or(ConfigError::NeedsStateEvaluation {
                algorithm: options.algorithm,
            })?;

        Ok(Self {
            search: MinimaxSearch::new_with_options(
                algorithm,
                options.depth,
                evaluator,
                search_options,
            ),
            evaluation: options.evaluation,
        })
    }

    pub fn evaluation(&self) -> EvaluationKind {
        self.evaluation
    }

    pub fn depth(&self) -> usize {
        self.search.max_depth
    }

    /// Run the search and return everything it found, not just the action
    pub fn search(&self, state: &GameState) -> Result<SearchReturn<Direction>, AgentError> {
        let result = self.search.choose_action(state)?;

        info!(
            algorithm = %result.algorithm,
            depth = self.search.max_depth,
            evaluation = %self.evaluation,
            action = %result.action,
            value = result.value,
            nodes_visited = result.stats.nodes_visited,
            "decided"
        );
        debug!(options = %result.summary(), "root options");

        Ok(result)
    }
}

impl PacmanAgent for SearchAgent {
    fn name(&self) -> String {
        self.search.algorithm.name().to_owned()
    }

    fn decide(&self, state: &GameState) -> Result<Direction, AgentError> {
        Ok(self.search(state)?.action)
    }
}
