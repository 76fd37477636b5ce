use std::marker::PhantomData;

use derivative::Derivative;
use tracing::info_span;

use crate::{turn::required_stack_frames, AdversarialGame, Scorable, SearchError};

use super::{
    alpha_beta, expectimax, minimax, Algorithm, SearchContext, SearchReturn, SearchStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional properties that can be defined for a [MinimaxSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_minimax::search::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.max_stack_frames, 1024);
/// ```
pub struct SearchOptions {
    /// The deepest the recursion is allowed to go
    ///
    /// A search of `depth` rounds over `N` agents needs `depth * N + 1` frames. Searches that
    /// would need more are refused up front instead of running out of stack halfway through.
    ///
    /// Defaults to 1024 frames
    pub max_stack_frames: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_stack_frames: 1024,
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// This is the struct that wraps a search algorithm, a depth limit and a scoring function, and
/// can be asked for the protagonist's best action in any number of game states
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxSearch<GameType, ScorableType> {
    /// Which variant of the search to run
    pub algorithm: Algorithm,
    /// How many full rounds to look ahead
    pub max_depth: usize,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
    _phantom: PhantomData<fn(&GameType)>,
}

impl<GameType, ScorableType> MinimaxSearch<GameType, ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `MinimaxSearch` with the default [SearchOptions]
    pub fn new(algorithm: Algorithm, max_depth: usize, score_function: ScorableType) -> Self {
        Self::new_with_options(algorithm, max_depth, score_function, Default::default())
    }

    /// Construct a new `MinimaxSearch` providing a set of [SearchOptions]
    ///
    /// [SearchOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    pub fn new_with_options(
        algorithm: Algorithm,
        max_depth: usize,
        score_function: ScorableType,
        options: SearchOptions,
    ) -> Self {
        Self {
            algorithm,
            max_depth,
            score_function,
            options,
            _phantom: PhantomData,
        }
    }

    /// The scoring function used at cutoff nodes
    pub fn score_function(&self) -> &ScorableType {
        &self.score_function
    }

    /// The options this search was built with
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Pick the protagonist's action in `game`
    ///
    /// The search starts with the protagonist at depth 0 and runs the whole bounded tree, there
    /// is no time limit. Each call is independent of every other call.
    ///
    /// Fails with [SearchError::NoLegalActions] if some agent that has to move can't, with
    /// [SearchError::TooFewAgents] if the game has no opponent, and with
    /// [SearchError::StackBudgetExceeded] if the tree is deeper than
    /// [SearchOptions::max_stack_frames] allows.
    pub fn choose_action(
        &self,
        game: &GameType,
    ) -> Result<SearchReturn<GameType::Action>, SearchError> {
        if self.max_depth == 0 {
            return Err(SearchError::InvalidDepth);
        }

        let num_agents = game.num_agents();
        if num_agents < 2 {
            return Err(SearchError::TooFewAgents { agents: num_agents });
        }

        let required = required_stack_frames(self.max_depth, num_agents);
        if required > self.options.max_stack_frames {
            return Err(SearchError::StackBudgetExceeded {
                required,
                budget: self.options.max_stack_frames,
            });
        }

        let context = SearchContext::new(&self.score_function, self.max_depth, num_agents);

        info_span!(
            "choose_action",
            algorithm = %self.algorithm,
            max_depth = self.max_depth,
            num_agents,
            chosen_action = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
            nodes_visited = tracing::field::Empty,
        )
        .in_scope(|| {
            let mut stats = SearchStats::default();

            let result = match self.algorithm {
                Algorithm::Minimax => minimax::choose(&context, game, &mut stats),
                Algorithm::AlphaBeta => alpha_beta::choose(&context, game, &mut stats),
                Algorithm::Expectimax => expectimax::choose(&context, game, &mut stats),
            }?;

            let current_span = tracing::Span::current();
            current_span.record("chosen_action", format!("{:?}", result.action).as_str());
            current_span.record("chosen_value", result.value);
            current_span.record("nodes_visited", result.stats.nodes_visited);

            Ok(result)
        })
    }
}
