//! Scoring functions for Pacman states
//!
//! [score_evaluation] and [better_evaluation] score a whole state and plug straight into
//! [multiagent_minimax::search::MinimaxSearch]. [reflex_evaluation] scores a single Pacman
//! action and only makes sense for the one ply [crate::reflex_agent::ReflexAgent].
//!
//! Distances are Manhattan distances. A feature that has nothing to measure (no food left, no
//! ghost of the right kind) contributes nothing.

use multiagent_minimax::{
    AdversarialGame, Value, BEST_POSSIBLE_SCORE, PROTAGONIST, WORST_POSSIBLE_SCORE,
};

use crate::game::{
    CapsuleGettableGame, Direction, FoodGettableGame, GhostGettableGame, GhostState,
    PacmanPositionGettableGame, Position,
};

fn nearest_distance(from: Position, targets: impl IntoIterator<Item = Position>) -> Option<u32> {
    targets
        .into_iter()
        .map(|target| from.manhattan_distance(&target))
        .min()
}

/// `1 / distance`, with nothing to measure counting as infinitely far away
///
/// Zero distances are treated as one. Callers that care about touching something (like an
/// active ghost) have to check for it before getting here.
fn reciprocal(distance: Option<u32>) -> Value {
    match distance {
        Some(distance) => 1.0 / distance.max(1) as Value,
        None => 0.0,
    }
}

fn terminal_value<T: AdversarialGame>(game: &T) -> Option<Value> {
    if game.is_lose() {
        Some(WORST_POSSIBLE_SCORE)
    } else if game.is_win() {
        Some(BEST_POSSIBLE_SCORE)
    } else {
        None
    }
}

/// The game's own score, with finished games pinned to the extremes
pub fn score_evaluation<T>(game: &T) -> Value
where
    T: AdversarialGame,
{
    terminal_value(game).unwrap_or_else(|| game.score())
}

/// Blends the score with a handful of board features
///
/// `score + 2/food - 15*capsules - 5/active + 4/scared - 20*foodCount`, where `food`, `active`
/// and `scared` are the distances to the nearest food, non-scared ghost and scared ghost. The
/// scared term only counts when every ghost is scared. Standing on an active ghost is a loss.
pub fn better_evaluation<T>(game: &T) -> Value
where
    T: AdversarialGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + CapsuleGettableGame
        + GhostGettableGame,
{
    if let Some(value) = terminal_value(game) {
        return value;
    }

    let pacman = game.pacman_position();
    let (scared, active): (Vec<&GhostState>, Vec<&GhostState>) =
        game.ghost_states().iter().partition(|ghost| ghost.is_scared());

    let nearest_food = nearest_distance(pacman, game.food_positions().iter().copied());
    let nearest_active = nearest_distance(pacman, active.iter().map(|ghost| ghost.position));
    let nearest_scared = nearest_distance(pacman, scared.iter().map(|ghost| ghost.position));

    let mut value = game.score() + 2.0 * reciprocal(nearest_food)
        - 15.0 * game.capsule_positions().len() as Value
        - 20.0 * game.food_count() as Value;

    match nearest_active {
        Some(0) => return WORST_POSSIBLE_SCORE,
        Some(_) => value -= 5.0 * reciprocal(nearest_active),
        None => value += 4.0 * reciprocal(nearest_scared),
    }

    value
}

/// Scores the state right after Pacman plays `action`
///
/// Landing next to nothing but food is good, landing on food is as good as it gets, and landing
/// on a ghost is a loss unless every ghost is scared.
pub fn reflex_evaluation<T>(game: &T, action: Direction) -> Value
where
    T: AdversarialGame<Action = Direction>
        + PacmanPositionGettableGame
        + FoodGettableGame
        + GhostGettableGame,
{
    let next = game.successor(PROTAGONIST, &action);
    let position = next.pacman_position();
    let ghosts = next.ghost_states();
    let all_scared = ghosts.iter().all(|ghost| ghost.is_scared());

    let on_ghost = ghosts.iter().any(|ghost| ghost.position == position);
    if next.is_lose() || (on_ghost && !all_scared) {
        return WORST_POSSIBLE_SCORE;
    }

    if game.has_food_at(position) {
        return BEST_POSSIBLE_SCORE;
    }

    let nearest_food = nearest_distance(position, next.food_positions().iter().copied());
    let nearest_ghost = nearest_distance(position, ghosts.iter().map(|ghost| ghost.position));

    let food_term = 100.0 * reciprocal(nearest_food);
    if all_scared {
        food_term + 50.0 * reciprocal(nearest_ghost)
    } else {
        food_term - 100.0 * reciprocal(nearest_ghost)
    }
}
