//! Expectimax. The protagonist maximizes while every adversary picks uniformly at random among
//! its legal actions, so an adversary's node is worth the average of its children.
//!
//! Averages depend on every child, so nothing can be pruned here.

use tracing::debug;

use crate::{
    turn::Turn, AdversarialGame, Scorable, SearchError, Value, PROTAGONIST,
    WORST_POSSIBLE_SCORE,
};

use super::{Algorithm, BestAction, SearchContext, SearchReturn, SearchStats};

/// The expectimax value of `game` when it is `turn.agent`'s move
///
/// A chance node that can reach both a certain win and a certain loss has no defined average.
/// It is treated as a certain loss.
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
        let probability = 1.0 / actions.len() as f64;

        let mut ret = 0.0;
        for action in &actions {
            let child = value(context, &game.successor(turn.agent, action), next, stats)?;
            ret += probability * child;
        }

        if ret.is_nan() {
            return Ok(WORST_POSSIBLE_SCORE);
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

    best.finish(Algorithm::Expectimax, options, *stats)
}
