use std::marker::PhantomData;

use derivative::Derivative;

use crate::{
    turn::{self, Turn},
    AdversarialGame, Scorable, Value,
};

/// The read-only parameters of a single decision
///
/// Every recursive call gets this passed in explicitly, nothing about the search is captured
/// implicitly. It is built once at the root and never changes while the decision runs.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), Copy(bound = ""))]
pub struct SearchContext<'a, GameType, ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: &'a ScorableType,
    /// Full rounds to look ahead before scoring
    pub max_depth: usize,
    /// Agents taking turns in this game
    pub num_agents: usize,
    _phantom: PhantomData<fn(&GameType)>,
}

impl<'a, GameType, ScorableType> SearchContext<'a, GameType, ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    /// Build the context for a search of `max_depth` rounds
    pub fn new(score_function: &'a ScorableType, max_depth: usize, num_agents: usize) -> Self {
        Self {
            score_function,
            max_depth,
            num_agents,
            _phantom: PhantomData,
        }
    }

    /// See [turn::is_cutoff]
    pub fn is_cutoff(&self, game: &GameType, depth: usize) -> bool {
        turn::is_cutoff(game, depth, self.max_depth)
    }

    /// Score a cutoff node
    pub fn evaluate(&self, game: &GameType, stats: &mut SearchStats) -> Value {
        stats.evaluations += 1;

        let value = self.score_function.score(game);
        debug_assert!(!value.is_nan(), "scoring functions must not return NaN");

        value
    }
}

/// Counters collected while a single decision runs
///
/// Each decision owns its own stats, they are never shared between searches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Every node the search touched, including the root and the cutoff nodes
    pub nodes_visited: usize,
    /// Calls to the scoring function
    pub evaluations: usize,
    /// Times Alpha-Beta stopped looking at the remaining siblings of a node
    pub prunes: usize,
    /// The deepest level (single agent moves from the root) that was visited
    pub max_level: usize,
}

impl SearchStats {
    pub(crate) fn visit(&mut self, turn: Turn, num_agents: usize) {
        self.nodes_visited += 1;
        self.max_level = self.max_level.max(turn.level(num_agents));
    }
}
