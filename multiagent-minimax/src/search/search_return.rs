use std::fmt::Debug;

use itertools::Itertools;
use text_trees::StringTreeNode;

use crate::{SearchError, Value, PROTAGONIST};

use super::{Algorithm, SearchStats};

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a single decision
/// It contains the chosen action and what we learned about every root action on the way there
pub struct SearchReturn<Action> {
    /// The algorithm that produced this result
    pub algorithm: Algorithm,
    /// The action the protagonist should play
    pub action: Action,
    /// The propagated value of [SearchReturn::action]
    pub value: Value,
    /// Every root action in the order the game listed them, with the value the search computed
    ///
    /// For [Algorithm::AlphaBeta] only the chosen value is guaranteed to be exact. Actions that
    /// lost may carry an upper bound that was enough to prove they were no better
    pub options: Vec<(Action, Value)>,
    /// Counters collected during the search
    pub stats: SearchStats,
}

impl<Action> SearchReturn<Action>
where
    Action: Clone + Debug + PartialEq,
{
    /// All root actions whose value matches the chosen value, in enumeration order
    ///
    /// The chosen action is always the first of these
    pub fn tied_actions(&self) -> Vec<&Action> {
        self.options
            .iter()
            .filter(|(_, value)| *value == self.value)
            .map(|(action, _)| action)
            .collect()
    }

    /// A one line summary of the root options, for logging
    pub fn summary(&self) -> String {
        self.options
            .iter()
            .map(|(action, value)| format!("{action:?}={value}"))
            .join(", ")
    }

    /// This returns a visual representation of the root of the search
    /// It shows the chosen value, and the value of each root action with the chosen one marked
    pub fn to_text_tree(&self) -> String {
        let mut root = StringTreeNode::new(format!(
            "{} chose {:?} ({})",
            self.algorithm, self.action, self.value
        ));

        let mut marked = false;
        for (action, value) in &self.options {
            let chosen = !marked && *action == self.action;
            marked |= chosen;

            let marker = if chosen { " *" } else { "" };
            root.push_node(StringTreeNode::new(format!("{action:?} {value}{marker}")));
        }

        format!("{}", root)
    }
}

/// Argmax with an earliest-wins tie-break
///
/// Actions are offered in enumeration order and an action only replaces the current best when
/// its value is strictly greater. The very first action is always taken, so even a root where
/// every action is a certain loss still produces an action.
#[derive(Debug)]
pub(crate) struct BestAction<Action> {
    best: Option<(Action, Value)>,
}

impl<Action: Clone> BestAction<Action> {
    pub(crate) fn new() -> Self {
        Self { best: None }
    }

    /// Returns true when `action` became the new best
    pub(crate) fn consider(&mut self, action: &Action, value: Value) -> bool {
        match &self.best {
            Some((_, best_value)) if value <= *best_value => false,
            _ => {
                self.best = Some((action.clone(), value));
                true
            }
        }
    }

    pub(crate) fn finish(
        self,
        algorithm: Algorithm,
        options: Vec<(Action, Value)>,
        stats: SearchStats,
    ) -> Result<SearchReturn<Action>, SearchError> {
        let (action, value) = self.best.ok_or(SearchError::NoLegalActions {
            agent: PROTAGONIST,
        })?;

        Ok(SearchReturn {
            algorithm,
            action,
            value,
            options,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(values: &[Value]) -> SearchReturn<usize> {
        let mut best = BestAction::new();
        let mut options = vec![];
        for (action, value) in values.iter().enumerate() {
            best.consider(&action, *value);
            options.push((action, *value));
        }

        best.finish(Algorithm::Minimax, options, SearchStats::default())
            .unwrap()
    }

    #[test]
    fn test_earliest_maximum_wins() {
        let result = scan(&[1.0, 4.0, 2.0, 4.0]);

        assert_eq!(result.action, 1);
        assert_eq!(result.value, 4.0);
        assert_eq!(result.tied_actions(), vec![&1, &3]);
    }

    #[test]
    fn test_all_losses_still_pick_the_first_action() {
        let result = scan(&[f64::NEG_INFINITY, f64::NEG_INFINITY]);

        assert_eq!(result.action, 0);
        assert_eq!(result.value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_nothing_to_choose_from() {
        let best: BestAction<usize> = BestAction::new();

        assert_eq!(
            best.finish(Algorithm::Expectimax, vec![], SearchStats::default()),
            Err(SearchError::NoLegalActions { agent: 0 })
        );
    }

    #[test]
    fn test_text_tree_marks_the_chosen_action() {
        let tree = scan(&[3.0, 5.0, 5.0]).to_text_tree();

        assert!(tree.contains("minimax chose 1 (5)"));
        assert!(tree.contains("1 5 *"));
        assert!(!tree.contains("2 5 *"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(scan(&[3.0, -1.5]).summary(), "0=3, 1=-1.5");
    }
}
