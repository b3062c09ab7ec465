// Board occupancy, game state and legal move generation
//
// Cells are claimed permanently: once a trail enters a cell it is never
// released. Search explores hypothetical moves by taking a Snapshot,
// mutating the state and restoring the snapshot wholesale afterwards.

use std::fmt;

use crate::types::{Coord, Direction, Player, BLUE_START, BOARD_SIZE, RED_START};

/// Occupancy of a single cell
pub type Cell = Option<Player>;

/// Fixed-size grid of cell occupancy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board with every cell empty
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Returns the owner of a cell, or None for empty and off-board cells
    pub fn get(&self, coord: Coord) -> Cell {
        if !coord.in_bounds() {
            return None;
        }
        self.cells[coord.row as usize][coord.col as usize]
    }

    /// True if the coordinate is on the board and unclaimed
    pub fn is_empty(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.cells[coord.row as usize][coord.col as usize].is_none()
    }

    /// Number of unclaimed cells
    pub fn empty_cells(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_none())
            .count()
    }

    fn claim(&mut self, coord: Coord, player: Player) {
        self.cells[coord.row as usize][coord.col as usize] = Some(player);
    }
}

/// Complete mutable state explored by the search: occupancy plus both trails.
/// The head of each player is the last element of its trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    blue_trail: Vec<Coord>,
    red_trail: Vec<Coord>,
}

/// Independent deep copy of a GameState, restorable with `GameState::restore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(GameState);

impl GameState {
    /// Fresh game: both heads on their start cells, everything else empty
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.claim(BLUE_START, Player::Blue);
        board.claim(RED_START, Player::Red);

        GameState {
            board,
            blue_trail: vec![BLUE_START],
            red_trail: vec![RED_START],
        }
    }

    /// Builds a state from explicit trails (start first, head last)
    ///
    /// # Returns
    /// * `Err` if a trail is empty, leaves the board, revisits a cell,
    ///   takes a non-orthogonal step or overlaps the other trail
    pub fn from_trails(blue: Vec<Coord>, red: Vec<Coord>) -> Result<Self, String> {
        let mut board = Board::empty();

        for (player, trail) in [(Player::Blue, &blue), (Player::Red, &red)] {
            if trail.is_empty() {
                return Err(format!("{} trail is empty", player));
            }
            for (i, &coord) in trail.iter().enumerate() {
                if !coord.in_bounds() {
                    return Err(format!("{} trail leaves the board at {}", player, coord));
                }
                if !board.is_empty(coord) {
                    return Err(format!("{} trail revisits occupied cell {}", player, coord));
                }
                if i > 0 && !trail[i - 1].is_adjacent(&coord) {
                    return Err(format!(
                        "{} trail jumps from {} to {}",
                        player,
                        trail[i - 1],
                        coord
                    ));
                }
                board.claim(coord, player);
            }
        }

        Ok(GameState {
            board,
            blue_trail: blue,
            red_trail: red,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Ordered trail of a player, from start cell to head
    pub fn trail(&self, player: Player) -> &[Coord] {
        match player {
            Player::Blue => &self.blue_trail,
            Player::Red => &self.red_trail,
        }
    }

    /// Current trail end of a player
    pub fn head(&self, player: Player) -> Coord {
        let trail = self.trail(player);
        // Trails are never empty: constructors seed them and moves only push.
        trail[trail.len() - 1]
    }

    /// Legal destinations for a player, in Up, Down, Left, Right order.
    /// Empty when the player is blocked.
    pub fn legal_moves(&self, player: Player) -> Vec<Coord> {
        let head = self.head(player);

        Direction::all()
            .iter()
            .map(|dir| dir.apply(&head))
            .filter(|&next| self.board.is_empty(next))
            .collect()
    }

    /// Number of legal destinations, without allocating
    pub fn mobility(&self, player: Player) -> usize {
        let head = self.head(player);

        Direction::all()
            .iter()
            .filter(|dir| self.board.is_empty(dir.apply(&head)))
            .count()
    }

    /// True if `destination` is a legal move for `player`
    pub fn is_legal(&self, player: Player, destination: Coord) -> bool {
        self.head(player).is_adjacent(&destination) && self.board.is_empty(destination)
    }

    /// True iff the player has no legal move
    pub fn is_game_over(&self, player: Player) -> bool {
        self.mobility(player) == 0
    }

    /// Validates and applies a move. Leaves the state untouched and
    /// returns false when the move is illegal.
    pub fn try_move(&mut self, player: Player, destination: Coord) -> bool {
        if !self.is_legal(player, destination) {
            return false;
        }
        self.apply_move(player, destination);
        true
    }

    /// Extends the player's trail to `destination` without validation.
    /// Callers must only pass moves produced by `legal_moves`.
    pub fn apply_move(&mut self, player: Player, destination: Coord) {
        self.board.claim(destination, player);
        match player {
            Player::Blue => self.blue_trail.push(destination),
            Player::Red => self.red_trail.push(destination),
        }
    }

    /// Takes an independent copy of the whole state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Replaces the state wholesale with a previously taken snapshot
    pub fn restore(&mut self, snapshot: Snapshot) {
        *self = snapshot.0;
    }

    /// Renders each board row as a string: `B`/`R` for heads, `b`/`r` for
    /// trail cells, `.` for empty cells
    pub fn rows(&self) -> Vec<String> {
        let blue_head = self.head(Player::Blue);
        let red_head = self.head(Player::Red);

        (0..BOARD_SIZE as i32)
            .map(|row| {
                (0..BOARD_SIZE as i32)
                    .map(|col| {
                        let coord = Coord::new(row, col);
                        match self.board.get(coord) {
                            None => '.',
                            Some(Player::Blue) if coord == blue_head => 'B',
                            Some(Player::Blue) => 'b',
                            Some(Player::Red) if coord == red_head => 'R',
                            Some(Player::Red) => 'r',
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for (row, line) in self.rows().iter().enumerate() {
            write!(f, "{} ", row)?;
            for ch in line.chars() {
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
