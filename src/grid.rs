use serde::{Deserialize, Serialize};

use crate::config::GRID_SIZE;

/// Grid position in logical cell coordinates.
///
/// Positions are immutable values; movement math always constructs a new
/// one. Coordinates are signed so walls mode can represent an off-board
/// head for the collision check to catch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Wall behavior, fixed for the lifetime of a game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Leaving the board ends the game.
    Walls,
    /// The board is a torus; leaving one edge re-enters the opposite one.
    Passthrough,
}

impl GameMode {
    /// Human-readable label used by the HUD and leaderboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Walls => "Walls",
            Self::Passthrough => "Pass-through",
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
/// Requesting the current direction again is a legal no-op turn.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Returns the head position one step ahead of `head`.
///
/// Pass-through mode wraps each coordinate onto the torus. Walls mode
/// leaves out-of-range coordinates as-is; `is_wall_collision` catches them
/// on the same tick.
#[must_use]
pub fn next_head(head: Position, direction: Direction, mode: GameMode) -> Position {
    let stepped = match direction {
        Direction::Up => Position::new(head.x, head.y - 1),
        Direction::Down => Position::new(head.x, head.y + 1),
        Direction::Left => Position::new(head.x - 1, head.y),
        Direction::Right => Position::new(head.x + 1, head.y),
    };

    match mode {
        GameMode::Walls => stepped,
        GameMode::Passthrough => Position::new(wrap_axis(stepped.x), wrap_axis(stepped.y)),
    }
}

/// Returns true when `position` lies outside the play field on either axis.
#[must_use]
pub fn is_wall_collision(position: Position) -> bool {
    position.x < 0 || position.x >= GRID_SIZE || position.y < 0 || position.y >= GRID_SIZE
}

fn wrap_axis(value: i32) -> i32 {
    let wrapped = value % GRID_SIZE;
    if wrapped < 0 { wrapped + GRID_SIZE } else { wrapped }
}
