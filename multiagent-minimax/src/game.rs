use std::fmt::Debug;

/// Position of an agent in the fixed turn order
pub type AgentIndex = usize;

/// The protagonist always moves first and is the only maximizing agent
pub const PROTAGONIST: AgentIndex = 0;

/// The view of a game that the search needs
///
/// States are treated as immutable values. The search never mutates a state in place, every
/// recursive call works on a state freshly returned from [AdversarialGame::successor].
pub trait AdversarialGame: Sized {
    /// A single move for a single agent
    type Action: Clone + Debug + PartialEq;

    /// The legal actions for the given agent
    ///
    /// The order of this list matters. When several actions end up with the same value the
    /// search picks the one that comes first here.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state after `agent` plays `action`
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    /// Number of agents taking turns, including the protagonist. Always at least 2
    fn num_agents(&self) -> usize;

    /// Whether the protagonist has won
    fn is_win(&self) -> bool;

    /// Whether the protagonist has lost
    fn is_lose(&self) -> bool;

    /// The intrinsic score of this state
    fn score(&self) -> f64;

    /// Whether this state ends the game
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
