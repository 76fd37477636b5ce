//! Reads the plain text board format
//!
//! ```text
//! %%%%%%%
//! %P . G%
//! %%%%%%%
//! ```
//!
//! `%` is a wall, `.` food, `o` a capsule, `P` Pacman and `G` a ghost. The first line is the
//! northmost row. Ghosts get their agent index in (x, y) order. Blank lines before and after
//! the board are ignored, one inside it is a ragged row.

use std::str::FromStr;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::game::{GameState, GhostState, Outcome, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("the layout is empty")]
    Empty,
    #[error("row {row} is {found} characters wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown character {character:?} at row {row}, column {column}")]
    UnknownCharacter {
        character: char,
        row: usize,
        column: usize,
    },
    #[error("the layout has no Pacman")]
    MissingPacman,
    #[error("the layout has a second Pacman at {second:?}, the first is at {first:?}")]
    DuplicatePacman { first: Position, second: Position },
    #[error("the layout has no ghosts")]
    NoGhosts,
}

pub fn parse_layout(text: &str) -> Result<GameState, LayoutError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let rows = match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => &[][..],
    };

    let width = rows.first().map(|row| row.chars().count()).ok_or(LayoutError::Empty)?;
    let height = rows.len();

    let mut walls = FxHashSet::default();
    let mut food = vec![];
    let mut capsules = vec![];
    let mut pacman: Option<Position> = None;
    let mut ghosts = vec![];

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LayoutError::Ragged {
                row,
                expected: width,
                found,
            });
        }

        let y = (height - 1 - row) as i32;
        for (column, character) in line.chars().enumerate() {
            let position = Position::new(column as i32, y);

            match character {
                '%' => {
                    walls.insert(position);
                }
                '.' => food.push(position),
                'o' => capsules.push(position),
                'P' => {
                    if let Some(first) = pacman {
                        return Err(LayoutError::DuplicatePacman {
                            first,
                            second: position,
                        });
                    }
                    pacman = Some(position);
                }
                'G' => ghosts.push(GhostState::new(position)),
                ' ' => {}
                character => {
                    return Err(LayoutError::UnknownCharacter {
                        character,
                        row,
                        column,
                    })
                }
            }
        }
    }

    let pacman = pacman.ok_or(LayoutError::MissingPacman)?;
    if ghosts.is_empty() {
        return Err(LayoutError::NoGhosts);
    }
    ghosts.sort_by_key(|ghost| ghost.start);
    food.sort();
    capsules.sort();

    Ok(GameState {
        width: width as u32,
        height: height as u32,
        walls,
        food,
        capsules,
        pacman,
        ghosts,
        score: 0,
        outcome: Outcome::Playing,
    })
}

impl FromStr for GameState {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_layout(s)
    }
}
