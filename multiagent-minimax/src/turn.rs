//! Turn and depth accounting shared by every search variant
//!
//! Agents move in a fixed order `0, 1, .., N - 1, 0, 1, ..`. A *level* in the tree is a single
//! agent's move, while the *depth* counts full rounds. Depth only increases when the last
//! adversary hands control back to the protagonist, so a round of `N` agents is `N` levels but a
//! single depth step.

use crate::{AdversarialGame, AgentIndex, PROTAGONIST};

/// Whose move it is and how many full rounds have been played since the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    /// The agent about to move
    pub agent: AgentIndex,
    /// Completed rounds since the root
    pub depth: usize,
}

impl Turn {
    /// Every search starts with the protagonist at depth 0
    pub const ROOT: Turn = Turn {
        agent: PROTAGONIST,
        depth: 0,
    };

    /// The turn after the current agent moves
    pub fn next(self, num_agents: usize) -> Turn {
        debug_assert!(num_agents >= 2, "games need at least two agents");
        debug_assert!(self.agent < num_agents);

        let agent = (self.agent + 1) % num_agents;
        let depth = if self.agent == num_agents - 1 {
            self.depth + 1
        } else {
            self.depth
        };

        Turn { agent, depth }
    }

    /// Whether the maximizing agent is the one moving
    pub fn is_protagonist(self) -> bool {
        self.agent == PROTAGONIST
    }

    /// Individual agent moves since the root
    pub fn level(self, num_agents: usize) -> usize {
        self.depth * num_agents + self.agent
    }
}

/// The search stops expanding a node once the depth limit is hit or the game is over
pub fn is_cutoff<GameType: AdversarialGame>(
    game: &GameType,
    depth: usize,
    max_depth: usize,
) -> bool {
    debug_assert!(depth <= max_depth, "depth {depth} is past {max_depth}");

    depth == max_depth || game.is_over()
}

/// The deepest the recursion can go for a search of `max_depth` rounds: one frame per agent
/// move plus the root
pub fn required_stack_frames(max_depth: usize, num_agents: usize) -> usize {
    max_depth.saturating_mul(num_agents).saturating_add(1)
}
