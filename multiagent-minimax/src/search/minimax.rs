//! Plain minimax. The protagonist maximizes and every adversary minimizes.

use tracing::debug;

use crate::{
    turn::Turn, AdversarialGame, Scorable, SearchError, Value, BEST_POSSIBLE_SCORE,
    PROTAGONIST, WORST_POSSIBLE_SCORE,
};

use super::{Algorithm, BestAction, SearchContext, SearchReturn, SearchStats};

/// The minimax value of `game` when it is `turn.agent`'s move
pub fn value<GameType, ScorableType>(
    context: &SearchContext<GameType, ScorableType>,
    game: &GameType,
    turn: Turn,
    stats: &mut SearchStats,
) -> Result<Value, SearchError>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    stats.visit(turn, context.num_agents);

    if context.is_cutoff(game, turn.depth) {
        return Ok(context.evaluate(game, stats));
    }

    let actions = game.legal_actions(turn.agent);
    if actions.is_empty() {
        return Err(SearchError::NoLegalActions { agent: turn.agent });
    }

    let next = turn.next(context.num_agents);

    if turn.is_protagonist() {
        let mut ret = WORST_POSSIBLE_SCORE;
        for action in &actions {
            let child = value(context, &game.successor(turn.agent, action), next, stats)?;
            ret = ret.max(child);
        }
        Ok(ret)
    } else {
        let mut ret = BEST_POSSIBLE_SCORE;
        for action in &actions {
            let child = value(context, &game.successor(turn.agent, action), next, stats)?;
            ret = ret.min(child);
        }
        Ok(ret)
    }
}

pub(crate) fn choose<GameType, ScorableType>(
    context: &SearchContext<GameType, ScorableType>,
    game: &GameType,
    stats: &mut SearchStats,
) -> Result<SearchReturn<GameType::Action>, SearchError>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    stats.visit(Turn::ROOT, context.num_agents);

    let actions = game.legal_actions(PROTAGONIST);
    let next = Turn::ROOT.next(context.num_agents);

    let mut best = BestAction::new();
    let mut options = Vec::with_capacity(actions.len());

    for action in actions {
        let child = value(context, &game.successor(PROTAGONIST, &action), next, stats)?;
        debug!(?action, value = child, "scored root action");

        best.consider(&action, child);
        options.push((action, child));
    }

    best.finish(Algorithm::Minimax, options, *stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tree::{leaf_score, Tree, TreeGame};

    #[test]
    fn test_min_then_max() {
        let tree = Tree::Node(vec![Tree::leaves(&[3.0, 5.0]), Tree::leaves(&[4.0, 4.0])]);
        let game = TreeGame::new(&tree, 2);
        let context = SearchContext::new(&leaf_score, 1, 2);

        let mut stats = SearchStats::default();
        assert_eq!(value(&context, &game, Turn::ROOT, &mut stats), Ok(4.0));
        assert_eq!(stats.nodes_visited, 7);
        assert_eq!(stats.evaluations, 4);
    }

    #[test]
    fn test_adversaries_all_minimize() {
        // Three agents, so both levels below the root minimize
        let tree = Tree::Node(vec![
            Tree::Node(vec![Tree::leaves(&[9.0, 1.0]), Tree::leaves(&[7.0])]),
            Tree::Node(vec![Tree::leaves(&[2.0, 3.0])]),
        ]);
        let game = TreeGame::new(&tree, 3);
        let context = SearchContext::new(&leaf_score, 1, 3);

        let mut stats = SearchStats::default();
        let result = choose(&context, &game, &mut stats).unwrap();

        assert_eq!(result.options, vec![(0, 1.0), (1, 2.0)]);
        assert_eq!(result.action, 1);
        assert_eq!(result.value, 2.0);
    }

    #[test]
    fn test_terminal_nodes_stop_the_search() {
        let tree = Tree::Node(vec![
            Tree::Node(vec![Tree::Lose, Tree::Leaf(10.0)]),
            Tree::Node(vec![Tree::Win]),
        ]);
        let game = TreeGame::new(&tree, 2);
        let context = SearchContext::new(&leaf_score, 1, 2);

        let mut stats = SearchStats::default();
        let result = choose(&context, &game, &mut stats).unwrap();

        assert_eq!(result.action, 1);
        assert_eq!(result.value, f64::INFINITY);
        assert_eq!(result.options[0].1, f64::NEG_INFINITY);
    }

    #[test]
    fn test_adversary_without_actions_is_an_error() {
        let tree = Tree::Node(vec![Tree::Node(vec![])]);
        let game = TreeGame::new(&tree, 2);
        let context = SearchContext::new(&leaf_score, 1, 2);

        let mut stats = SearchStats::default();
        assert_eq!(
            choose(&context, &game, &mut stats),
            Err(SearchError::NoLegalActions { agent: 1 })
        );
    }

    #[test]
    fn test_root_without_actions_is_an_error() {
        let tree = Tree::Node(vec![]);
        let game = TreeGame::new(&tree, 2);
        let context = SearchContext::new(&leaf_score, 1, 2);

        let mut stats = SearchStats::default();
        assert_eq!(
            choose(&context, &game, &mut stats),
            Err(SearchError::NoLegalActions { agent: 0 })
        );
    }
}
