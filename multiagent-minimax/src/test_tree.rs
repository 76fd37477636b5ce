//! A synthetic game whose states are the nodes of an explicit tree. Every agent's legal actions
//! are the child indexes of the current node, in order.

use rand::{rngs::StdRng, Rng};

use crate::{turn::Turn, AdversarialGame, AgentIndex};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Tree {
    Leaf(f64),
    Win,
    Lose,
    Node(Vec<Tree>),
}

impl Tree {
    pub(crate) fn leaves(values: &[f64]) -> Tree {
        Tree::Node(values.iter().map(|v| Tree::Leaf(*v)).collect())
    }

    /// Every non-terminal path is exactly `levels` moves long. Leaf values are small integers so
    /// that ties show up often.
    pub(crate) fn random(rng: &mut StdRng, levels: usize) -> Tree {
        if levels == 0 {
            return Tree::Leaf(rng.gen_range(-10..=10) as f64);
        }

        if rng.gen_bool(0.05) {
            return if rng.gen_bool(0.5) {
                Tree::Win
            } else {
                Tree::Lose
            };
        }

        let children = rng.gen_range(1..=3);
        Tree::Node((0..children).map(|_| Tree::random(rng, levels - 1)).collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeGame<'tree> {
    pub(crate) node: &'tree Tree,
    pub(crate) level: usize,
    pub(crate) num_agents: usize,
}

impl<'tree> TreeGame<'tree> {
    pub(crate) fn new(node: &'tree Tree, num_agents: usize) -> Self {
        Self {
            node,
            level: 0,
            num_agents,
        }
    }

    /// Every node below (and including) this one, paired with the turn it is reached on
    pub(crate) fn all_nodes(self) -> Vec<(TreeGame<'tree>, Turn)> {
        let turn = Turn {
            agent: self.level % self.num_agents,
            depth: self.level / self.num_agents,
        };
        let mut nodes = vec![(self, turn)];

        for action in self.legal_actions(turn.agent) {
            nodes.extend(self.successor(turn.agent, &action).all_nodes());
        }

        nodes
    }
}

impl<'tree> AdversarialGame for TreeGame<'tree> {
    type Action = usize;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
        match self.node {
            Tree::Node(children) => (0..children.len()).collect(),
            _ => vec![],
        }
    }

    fn successor(&self, _agent: AgentIndex, action: &usize) -> Self {
        match self.node {
            Tree::Node(children) => TreeGame {
                node: &children[*action],
                level: self.level + 1,
                num_agents: self.num_agents,
            },
            _ => *self,
        }
    }

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn is_win(&self) -> bool {
        matches!(self.node, Tree::Win)
    }

    fn is_lose(&self) -> bool {
        matches!(self.node, Tree::Lose)
    }

    fn score(&self) -> f64 {
        match self.node {
            Tree::Leaf(value) => *value,
            Tree::Win => f64::INFINITY,
            Tree::Lose => f64::NEG_INFINITY,
            Tree::Node(_) => 0.0,
        }
    }
}

pub(crate) fn leaf_score(game: &TreeGame) -> f64 {
    game.score()
}
