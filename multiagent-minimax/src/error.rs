use thiserror::Error;

use crate::AgentIndex;

/// Everything that can stop a search from producing an action
///
/// Errors abort the whole decision. No partial or best-effort action is ever returned, the
/// caller decides what to do instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An agent had to move but had nothing it was allowed to do
    #[error("agent {agent} has no legal actions")]
    NoLegalActions {
        /// The agent whose turn it was
        agent: AgentIndex,
    },
    /// The search would recurse deeper than the configured budget allows
    #[error("search needs {required} stack frames but the budget is {budget}")]
    StackBudgetExceeded {
        /// Frames needed for the full tree, `depth * agents + 1`
        required: usize,
        /// Frames allowed by [crate::search::SearchOptions::max_stack_frames]
        budget: usize,
    },
    /// Adversarial searches need the protagonist and at least one opponent
    #[error("search needs at least 2 agents but the game has {agents}")]
    TooFewAgents {
        /// Agents the game reported
        agents: usize,
    },
    /// Searches need to look at least one full round ahead
    #[error("search depth must be at least 1")]
    InvalidDepth,
}
