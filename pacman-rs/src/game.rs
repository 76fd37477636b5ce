use std::fmt::Display;

use multiagent_minimax::{AdversarialGame, AgentIndex, PROTAGONIST};
use rustc_hash::FxHashSet;

/// Points lost for every move Pacman makes, including `Stop`
pub const TIME_PENALTY: i32 = 1;
/// Points for a single food pellet
pub const FOOD_SCORE: i32 = 10;
/// Bonus for clearing the board
pub const WIN_SCORE: i32 = 500;
/// Points for running into a scared ghost
pub const EAT_GHOST_SCORE: i32 = 200;
/// Points lost when an active ghost catches Pacman
pub const DEATH_PENALTY: i32 = 500;
/// How many ghost moves a capsule keeps the ghosts scared for
pub const SCARED_TIME: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    pub fn neighbor(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction in enumeration order. Searches break ties in favour of the earlier one
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// The directions that actually move an agent
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GhostState {
    pub position: Position,
    /// Where the ghost respawns after being eaten
    pub start: Position,
    /// Remaining ghost moves this ghost stays scared for, 0 means active
    #[serde(default)]
    pub scared_timer: u32,
    /// The direction of the last move, ghosts don't turn around unless they have to
    #[serde(default = "stopped")]
    pub direction: Direction,
}

fn stopped() -> Direction {
    Direction::Stop
}

impl GhostState {
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            start,
            scared_timer: 0,
            direction: Direction::Stop,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    Win,
    Lose,
    /// Only ever produced by the runner, a state never times out on its own
    Timeout,
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Playing
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Outcome::Playing => "playing",
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Timeout => "timeout",
        };
        f.pad(name)
    }
}

/// A full snapshot of the board
///
/// Pacman is agent 0 and ghost `i` is agent `i + 1`. States are values, every move returns a
/// new state through [GameState::successor] and leaves the old one alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub width: u32,
    pub height: u32,
    pub walls: FxHashSet<Position>,
    pub food: Vec<Position>,
    #[serde(default)]
    pub capsules: Vec<Position>,
    pub pacman: Position,
    pub ghosts: Vec<GhostState>,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub outcome: Outcome,
}

impl GameState {
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Anything off the board counts as a wall
    pub fn is_wall(&self, position: Position) -> bool {
        !self.in_bounds(position) || self.walls.contains(&position)
    }

    pub fn has_food(&self, position: Position) -> bool {
        self.food.contains(&position)
    }

    pub fn has_capsule(&self, position: Position) -> bool {
        self.capsules.contains(&position)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.outcome, Outcome::Win | Outcome::Lose)
    }

    pub fn num_ghosts(&self) -> usize {
        self.ghosts.len()
    }

    pub fn legal_pacman_actions(&self) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        Direction::ALL
            .into_iter()
            .filter(|direction| {
                *direction == Direction::Stop || !self.is_wall(self.pacman.neighbor(*direction))
            })
            .collect()
    }

    /// Ghosts can't stop and won't reverse unless the reverse is their only way out
    pub fn legal_ghost_actions(&self, ghost: usize) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }
        let Some(state) = self.ghosts.get(ghost) else {
            return vec![];
        };

        let mut possible: Vec<Direction> = Direction::MOVES
            .into_iter()
            .filter(|direction| !self.is_wall(state.position.neighbor(*direction)))
            .collect();

        let reverse = state.direction.reverse();
        if possible.len() > 1 {
            possible.retain(|direction| *direction != reverse);
        }

        if possible.is_empty() {
            possible.push(Direction::Stop);
        }

        possible
    }

    pub fn legal_agent_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if agent == PROTAGONIST {
            self.legal_pacman_actions()
        } else {
            self.legal_ghost_actions(agent - 1)
        }
    }

    /// The state after `agent` moves in `direction`
    ///
    /// The move is not checked against the legal actions. A finished game stays exactly as it
    /// is.
    pub fn successor(&self, agent: AgentIndex, direction: Direction) -> GameState {
        let mut next = self.clone();
        if self.is_over() {
            return next;
        }

        if agent == PROTAGONIST {
            next.move_pacman(direction);
        } else {
            next.move_ghost(agent - 1, direction);
        }
        next.check_collisions();

        next
    }

    fn move_pacman(&mut self, direction: Direction) {
        self.pacman = self.pacman.neighbor(direction);
        self.score -= TIME_PENALTY;

        if let Some(index) = self.food.iter().position(|food| *food == self.pacman) {
            self.food.remove(index);
            self.score += FOOD_SCORE;

            if self.food.is_empty() {
                self.score += WIN_SCORE;
                self.outcome = Outcome::Win;
            }
        }

        if let Some(index) = self.capsules.iter().position(|c| *c == self.pacman) {
            self.capsules.remove(index);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }
    }

    fn move_ghost(&mut self, ghost: usize, direction: Direction) {
        if let Some(state) = self.ghosts.get_mut(ghost) {
            state.position = state.position.neighbor(direction);
            state.direction = direction;
            state.scared_timer = state.scared_timer.saturating_sub(1);
        }
    }

    fn check_collisions(&mut self) {
        for index in 0..self.ghosts.len() {
            if self.ghosts[index].position != self.pacman {
                continue;
            }

            if self.ghosts[index].is_scared() {
                self.score += EAT_GHOST_SCORE;
                let ghost = &mut self.ghosts[index];
                *ghost = GhostState::new(ghost.start);
            } else if self.outcome != Outcome::Win {
                self.score -= DEATH_PENALTY;
                self.outcome = Outcome::Lose;
            }
        }
    }
}

/// Renders the board in the same format [crate::layout] reads. Scared ghosts are drawn as `g`
impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                let position = Position::new(x, y);

                let c = if let Some(ghost) = self.ghosts.iter().find(|g| g.position == position) {
                    if ghost.is_scared() {
                        'g'
                    } else {
                        'G'
                    }
                } else if self.pacman == position {
                    'P'
                } else if self.walls.contains(&position) {
                    '%'
                } else if self.has_food(position) {
                    '.'
                } else if self.has_capsule(position) {
                    'o'
                } else {
                    ' '
                };

                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl AdversarialGame for GameState {
    type Action = Direction;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        self.legal_agent_actions(agent)
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        GameState::successor(self, agent, *action)
    }

    fn num_agents(&self) -> usize {
        self.ghosts.len() + 1
    }

    fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    fn is_lose(&self) -> bool {
        self.outcome == Outcome::Lose
    }

    fn score(&self) -> f64 {
        self.score as f64
    }
}

pub trait PacmanPositionGettableGame {
    fn pacman_position(&self) -> Position;
}

pub trait FoodGettableGame {
    fn food_positions(&self) -> &[Position];
    fn has_food_at(&self, position: Position) -> bool;

    fn food_count(&self) -> usize {
        self.food_positions().len()
    }
}

pub trait CapsuleGettableGame {
    fn capsule_positions(&self) -> &[Position];
}

pub trait GhostGettableGame {
    fn ghost_states(&self) -> &[GhostState];
}

impl PacmanPositionGettableGame for GameState {
    fn pacman_position(&self) -> Position {
        self.pacman
    }
}

impl FoodGettableGame for GameState {
    fn food_positions(&self) -> &[Position] {
        &self.food
    }

    fn has_food_at(&self, position: Position) -> bool {
        self.has_food(position)
    }
}

impl CapsuleGettableGame for GameState {
    fn capsule_positions(&self) -> &[Position] {
        &self.capsules
    }
}

impl GhostGettableGame for GameState {
    fn ghost_states(&self) -> &[GhostState] {
        &self.ghosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::parse_layout;

    const CORRIDOR: &str = include_str!("../fixtures/corridor.lay");
    const CAPSULE: &str = include_str!("../fixtures/capsule.lay");

    fn play(state: &GameState, moves: &[(AgentIndex, Direction)]) -> GameState {
        moves
            .iter()
            .fold(state.clone(), |state, (agent, direction)| {
                state.successor(*agent, *direction)
            })
    }

    #[test]
    fn test_pacman_can_always_stop() {
        let state = parse_layout(CORRIDOR).unwrap();

        assert_eq!(state.pacman, Position::new(1, 1));
        assert_eq!(
            state.legal_pacman_actions(),
            vec![Direction::East, Direction::Stop]
        );
    }

    #[test]
    fn test_ghosts_dont_stop_or_reverse() {
        let state = parse_layout(CORRIDOR).unwrap();
        assert_eq!(state.legal_ghost_actions(0), vec![Direction::West]);

        let state = play(&state, &[(0, Direction::Stop), (1, Direction::West)]);
        assert_eq!(state.ghosts[0].position, Position::new(4, 1));
        assert_eq!(state.ghosts[0].direction, Direction::West);
        // East is open but it would be turning around
        assert_eq!(state.legal_ghost_actions(0), vec![Direction::West]);
    }

    #[test]
    fn test_ghost_reverses_at_a_dead_end() {
        let mut state = parse_layout(CORRIDOR).unwrap();
        state.ghosts[0].direction = Direction::East;

        assert_eq!(state.legal_ghost_actions(0), vec![Direction::West]);
    }

    #[test]
    fn test_ghost_with_nowhere_to_go_stops() {
        let mut state = parse_layout(CORRIDOR).unwrap();
        state.walls.insert(Position::new(4, 1));

        assert_eq!(state.legal_ghost_actions(0), vec![Direction::Stop]);
    }

    #[test]
    fn test_eating_the_last_food_wins() {
        let state = parse_layout(CORRIDOR).unwrap();
        let state = play(
            &state,
            &[
                (0, Direction::East),
                (1, Direction::West),
                (0, Direction::East),
            ],
        );

        assert_eq!(state.pacman, Position::new(3, 1));
        assert!(state.food.is_empty());
        assert_eq!(state.score, -1 + (-1 + FOOD_SCORE + WIN_SCORE));
        assert!(state.is_win());
        assert!(state.legal_pacman_actions().is_empty());
    }

    #[test]
    fn test_active_ghost_catches_pacman() {
        let state = parse_layout(CORRIDOR).unwrap();
        let state = play(
            &state,
            &[
                (0, Direction::Stop),
                (1, Direction::West),
                (0, Direction::Stop),
                (1, Direction::West),
                (0, Direction::Stop),
                (1, Direction::West),
            ],
        );
        assert_eq!(state.ghosts[0].position, Position::new(2, 1));
        assert_eq!(state.score, -3);
        assert!(!state.is_over());

        let state = state.successor(0, Direction::East);
        assert!(state.is_lose());
        assert_eq!(state.score, -4 - DEATH_PENALTY);
    }

    #[test]
    fn test_finished_games_dont_change() {
        let state = parse_layout(CORRIDOR).unwrap();
        let state = play(
            &state,
            &[
                (0, Direction::East),
                (1, Direction::West),
                (0, Direction::East),
            ],
        );

        assert_eq!(state.successor(1, Direction::West), state);
    }

    #[test]
    fn test_capsule_scares_ghosts_and_they_can_be_eaten() {
        let state = parse_layout(CAPSULE).unwrap();
        assert_eq!(state.pacman, Position::new(1, 2));
        assert_eq!(state.capsules, vec![Position::new(2, 2)]);

        let state = state.successor(0, Direction::East);
        assert!(state.capsules.is_empty());
        assert_eq!(state.ghosts[0].scared_timer, SCARED_TIME);

        let state = state.successor(1, Direction::West);
        assert_eq!(state.ghosts[0].scared_timer, SCARED_TIME - 1);

        let state = play(&state, &[(0, Direction::East), (1, Direction::West)]);
        assert_eq!(state.score, -2 + EAT_GHOST_SCORE);
        assert_eq!(state.ghosts[0], GhostState::new(Position::new(5, 2)));
        assert!(!state.is_over());
    }

    #[test]
    fn test_adversarial_game_view() {
        let state = parse_layout(CORRIDOR).unwrap();

        assert_eq!(state.num_agents(), 2);
        assert_eq!(state.legal_actions(1), vec![Direction::West]);
        assert_eq!(AdversarialGame::score(&state), 0.0);
        assert_eq!(
            AdversarialGame::successor(&state, 0, &Direction::East).pacman,
            Position::new(2, 1)
        );
    }

    #[test]
    fn test_display_matches_the_layout() {
        let state = parse_layout(CORRIDOR).unwrap();

        assert_eq!(state.to_string().trim_end(), CORRIDOR.trim_end());
    }

    #[test]
    fn test_json_fixture() {
        let fixture: GameState =
            serde_json::from_str(include_str!("../fixtures/corridor_after_one_round.json"))
                .unwrap();

        let state = play(
            &parse_layout(CORRIDOR).unwrap(),
            &[(0, Direction::East), (1, Direction::West)],
        );
        assert_eq!(fixture, state);

        let round_trip: GameState =
            serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
        assert_eq!(round_trip, state);
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(
            Position::new(1, 1).manhattan_distance(&Position::new(4, -2)),
            6
        );
    }
}
