//! Minimax with Alpha-Beta pruning
//!
//! `alpha` is the best value the protagonist can already guarantee on the path to the root, and
//! `beta` is the best value the adversaries can already guarantee. Once a maximizing node finds
//! a child worth more than `beta` (or a minimizing node finds one worth less than `alpha`) an
//! ancestor will never let play reach this node, so the remaining siblings are skipped.
//!
//! Called with the full window `(WORST_POSSIBLE_SCORE, BEST_POSSIBLE_SCORE)` [value] returns
//! exactly the [super::minimax::value] of the node. Pruning only changes how many nodes get
//! visited.

use tracing::{debug, trace};

use crate::{
    turn::Turn, AdversarialGame, Scorable, SearchError, Value, BEST_POSSIBLE_SCORE,
    PROTAGONIST, WORST_POSSIBLE_SCORE,
};

use super::{Algorithm, BestAction, SearchContext, SearchReturn, SearchStats};

/// The Alpha-Beta value of `game` when it is `turn.agent`'s move
///
/// Values inside `(alpha, beta)` are exact. A value above `beta` is only a lower bound of the
/// true value, and a value below `alpha` only an upper bound.
pub fn value<GameType, ScorableType>(
    context: &SearchContext<GameType, ScorableType>,
    game: &GameType,
    turn: Turn,
    alpha: Value,
    beta: Value,
    stats: &mut SearchStats,
) -> Result<Value, SearchError>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    let mut alpha = alpha;
    let mut beta = beta;

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
            let child = value(
                context,
                &game.successor(turn.agent, action),
                next,
                alpha,
                beta,
                stats,
            )?;
            ret = ret.max(child);

            if ret > beta {
                trace!(agent = turn.agent, depth = turn.depth, ret, beta, "beta cutoff");
                stats.prunes += 1;
                return Ok(ret);
            }

            alpha = alpha.max(ret);
        }
        Ok(ret)
    } else {
        let mut ret = BEST_POSSIBLE_SCORE;
        for action in &actions {
            let child = value(
                context,
                &game.successor(turn.agent, action),
                next,
                alpha,
                beta,
                stats,
            )?;
            ret = ret.min(child);

            if ret < alpha {
                trace!(agent = turn.agent, depth = turn.depth, ret, alpha, "alpha cutoff");
                stats.prunes += 1;
                return Ok(ret);
            }

            beta = beta.min(ret);
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

    let mut alpha = WORST_POSSIBLE_SCORE;
    let beta = BEST_POSSIBLE_SCORE;

    let mut best = BestAction::new();
    let mut options = Vec::with_capacity(actions.len());

    for action in actions {
        let child = value(
            context,
            &game.successor(PROTAGONIST, &action),
            next,
            alpha,
            beta,
            stats,
        )?;
        debug!(?action, value = child, alpha, "scored root action");

        // Ties keep the action we already have, same as plain minimax
        best.consider(&action, child);
        alpha = alpha.max(child);
        options.push((action, child));
    }

    best.finish(Algorithm::AlphaBeta, options, *stats)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        search::minimax,
        test_tree::{leaf_score, Tree, TreeGame},
    };

    #[test]
    fn test_same_choice_as_minimax_with_fewer_nodes() {
        let tree = Tree::Node(vec![Tree::leaves(&[3.0, 5.0]), Tree::leaves(&[4.0, 4.0])]);
        let game = TreeGame::new(&tree, 2);
        let context = SearchContext::new(&leaf_score, 1, 2);

        let mut minimax_stats = SearchStats::default();
        let expected = minimax::choose(&context, &game, &mut minimax_stats).unwrap();

        let mut stats = SearchStats::default();
        let result = choose(&context, &game, &mut stats).unwrap();

        assert_eq!(result.action, 1);
        assert_eq!(result.value, 4.0);
        assert_eq!(result.action, expected.action);
        assert_eq!(result.value, expected.value);
        assert!(stats.nodes_visited <= minimax_stats.nodes_visited);
    }

    #[test]
    fn test_prunes_hopeless_siblings() {
        // Once the first leaf under B shows B is worth at most 1, the 100 can't matter
        let tree = Tree::Node(vec![
            Tree::leaves(&[3.0, 5.0]),
            Tree::leaves(&[1.0, 100.0]),
        ]);
        let game = TreeGame::new(&tree, 2);
        let context = SearchContext::new(&leaf_score, 1, 2);

        let mut stats = SearchStats::default();
        let result = choose(&context, &game, &mut stats).unwrap();

        assert_eq!(result.action, 0);
        assert_eq!(result.value, 3.0);
        assert_eq!(result.options, vec![(0, 3.0), (1, 1.0)]);
        assert_eq!(stats.prunes, 1);
        assert_eq!(stats.evaluations, 3);
    }

    #[test]
    fn test_full_window_matches_minimax_at_every_node() {
        let mut rng = StdRng::seed_from_u64(42);

        for num_agents in 2..=4 {
            for max_depth in 1..=2 {
                for _ in 0..25 {
                    let tree = Tree::random(&mut rng, num_agents * max_depth);
                    let root = TreeGame::new(&tree, num_agents);
                    let context = SearchContext::new(&leaf_score, max_depth, num_agents);

                    for (node, turn) in root.all_nodes() {
                        let expected =
                            minimax::value(&context, &node, turn, &mut SearchStats::default());
                        let pruned = value(
                            &context,
                            &node,
                            turn,
                            WORST_POSSIBLE_SCORE,
                            BEST_POSSIBLE_SCORE,
                            &mut SearchStats::default(),
                        );

                        assert_eq!(pruned, expected, "{tree:?} at {turn:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_root_decision_matches_minimax_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(7);

        for num_agents in 2..=3 {
            for max_depth in 1..=3 {
                for _ in 0..25 {
                    let tree = Tree::random(&mut rng, num_agents * max_depth);
                    let game = TreeGame::new(&tree, num_agents);
                    let context = SearchContext::new(&leaf_score, max_depth, num_agents);

                    let mut minimax_stats = SearchStats::default();
                    let expected = minimax::choose(&context, &game, &mut minimax_stats);

                    let mut stats = SearchStats::default();
                    let result = choose(&context, &game, &mut stats);

                    match (expected, result) {
                        (Ok(expected), Ok(result)) => {
                            assert_eq!(result.action, expected.action, "{tree:?}");
                            assert_eq!(result.value, expected.value, "{tree:?}");
                            assert!(stats.nodes_visited <= minimax_stats.nodes_visited);
                        }
                        (expected, result) => assert_eq!(
                            expected.map(|r| r.action),
                            result.map(|r| r.action)
                        ),
                    }
                }
            }
        }
    }
}
