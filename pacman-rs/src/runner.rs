use tracing::{debug, info_span, warn};

use crate::{AgentError, BoxedGhost, Direction, GameState, GhostAgent, Outcome, PacmanAgent};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub score: i32,
    /// Pacman moves played
    pub moves: usize,
    /// Pacman turns lost to failed decisions
    pub forfeits: usize,
    pub final_state: GameState,
}

/// Play a whole game
///
/// Each round Pacman moves first and then every ghost in index order, until the game is won,
/// lost, or `max_moves` rounds have been played. A Pacman decision that fails forfeits the turn
/// and Pacman stays put. A failed ghost decision makes that ghost take its first legal move.
pub fn run_game(
    state: GameState,
    pacman: &dyn PacmanAgent,
    ghosts: &[BoxedGhost],
    max_moves: usize,
) -> Result<GameRecord, AgentError> {
    if ghosts.len() < state.num_ghosts() {
        return Err(AgentError::MissingGhostAgent {
            ghost: ghosts.len() + 1,
        });
    }

    let span = info_span!(
        "run_game",
        pacman = %pacman.name(),
        ghosts = state.num_ghosts(),
        max_moves,
        outcome = tracing::field::Empty,
        score = tracing::field::Empty,
    );
    let _enter = span.enter();

    let mut state = state;
    let mut moves = 0;
    let mut forfeits = 0;

    while !state.is_over() && moves < max_moves {
        let action = match pacman.decide(&state) {
            Ok(action) => action,
            Err(error) => {
                warn!(%error, turn = moves, "pacman forfeits the turn");
                forfeits += 1;
                Direction::Stop
            }
        };
        state = state.successor(0, action);
        moves += 1;

        for (index, ghost) in ghosts.iter().take(state.num_ghosts()).enumerate() {
            if state.is_over() {
                break;
            }

            let agent = index + 1;
            let action = ghost_action(ghost.as_ref(), &state, agent);
            state = state.successor(agent, action);
        }

        debug!(turn = moves, score = state.score, "round played");
    }

    let outcome = if state.is_over() {
        state.outcome
    } else {
        Outcome::Timeout
    };
    span.record("outcome", outcome.to_string().as_str());
    span.record("score", state.score);

    Ok(GameRecord {
        outcome,
        score: state.score,
        moves,
        forfeits,
        final_state: state,
    })
}

fn ghost_action(
    ghost: &(dyn GhostAgent + Send + Sync),
    state: &GameState,
    agent: usize,
) -> Direction {
    match ghost.decide(state, agent) {
        Ok(action) => action,
        Err(error) => {
            warn!(%error, agent, "ghost decision failed");
            state
                .legal_agent_actions(agent)
                .first()
                .copied()
                .unwrap_or(Direction::Stop)
        }
    }
}
