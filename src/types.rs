// Core game types shared by the rules engine, the search and the controller

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the square board
pub const BOARD_SIZE: usize = 5;

/// Starting cell of the Blue trail
pub const BLUE_START: Coord = Coord { row: 1, col: 1 };

/// Starting cell of the Red trail
pub const RED_START: Coord = Coord { row: 3, col: 3 };

/// The two sides of a duel. Blue is driven by the human, Red by the AI.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Blue,
    Red,
}

impl Player {
    /// Returns the other side
    pub fn opponent(self) -> Player {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::Blue => "blue",
            Player::Red => "red",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid position. Signed so that off-board neighbours can be represented
/// and rejected by bounds checks.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }

    /// True if the coordinate lies inside the board
    pub fn in_bounds(&self) -> bool {
        let size = BOARD_SIZE as i32;
        self.row >= 0 && self.row < size && self.col >= 0 && self.col < size
    }

    /// True if `other` is one orthogonal step away
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four orthogonal steps a trail can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in move-generation order.
    /// Search tie-breaks depend on this order.
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the neighbouring coordinate in this direction (row 0 is the top)
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { row: coord.row - 1, col: coord.col },
            Direction::Down => Coord { row: coord.row + 1, col: coord.col },
            Direction::Left => Coord { row: coord.row, col: coord.col - 1 },
            Direction::Right => Coord { row: coord.row, col: coord.col + 1 },
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// AI strength, fixed for the duration of a game
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move
    #[default]
    Easy,
    /// Depth-bounded minimax
    Medium,
    /// Depth-bounded alpha-beta
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {}", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
