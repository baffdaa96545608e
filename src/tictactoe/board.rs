//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines;

/// A cell on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// Convert a flat position (0-8) to (row, col) coordinates
pub fn to_coords(position: usize) -> (usize, usize) {
    (position / 3, position % 3)
}

/// Convert (row, col) coordinates to a flat position (0-8)
pub fn to_position(row: usize, col: usize) -> usize {
    row * 3 + col
}

/// Complete board state: cells plus whose turn it is.
///
/// Implements `Copy` (10 bytes), so searches can take working copies freely;
/// `make_move` returns a new state and never mutates its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
            to_move: first_player,
        }
    }

    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; 9], crate::Error> {
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    fn count_pieces(cells: &[Cell; 9]) -> (usize, usize) {
        let x = cells.iter().filter(|&&c| c == Cell::X).count();
        let o = cells.iter().filter(|&&c| c == Cell::O).count();
        (x, o)
    }

    fn turn_from_counts(x: usize, o: usize) -> Result<Player, crate::Error> {
        if x == o {
            Ok(Player::X)
        } else if x == o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: x,
                o_count: o,
            })
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string holds 9 cell characters (whitespace is filtered out) with an
    /// optional `_X` or `_O` suffix fixing the player to move. Without the
    /// suffix the turn is inferred from the piece counts, defaulting to
    /// X-first semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the board part is shorter than 9 cells, a character
    /// is not a valid cell, the piece counts differ by more than one, or an
    /// explicit suffix conflicts with the counts.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let (board_part, specified_turn) = match cleaned.find('_') {
            Some(idx) => {
                let suffix = &cleaned[idx + 1..];
                let player = match suffix {
                    "X" => Player::X,
                    "O" => Player::O,
                    _ => {
                        return Err(crate::Error::InvalidPlayerString {
                            player: suffix.to_string(),
                            context: s.to_string(),
                        });
                    }
                };
                (&cleaned[..idx], Some(player))
            }
            None => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, s)?;
        let (x, o) = Self::count_pieces(&cells);

        let to_move = match specified_turn {
            Some(player) => {
                let consistent = match player {
                    Player::X => x == o || o == x + 1,
                    Player::O => x == o || x == o + 1,
                };
                if !consistent {
                    return Err(crate::Error::InvalidConfiguration {
                        message: format!(
                            "piece counts (X={x}, O={o}) are inconsistent with the turn suffix in '{s}'"
                        ),
                    });
                }
                player
            }
            None => Self::turn_from_counts(x, o)?,
        };

        Ok(BoardState { cells, to_move })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, position: usize) -> Cell {
        self.cells[position]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, position: usize) -> bool {
        self.cells[position] == Cell::Empty
    }

    /// Count the occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        let (x, o) = Self::count_pieces(&self.cells);
        x + o
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Get legal moves in this position (empty cells when the game is not over)
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Make a move and return the resulting board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, position: usize) -> Result<BoardState, crate::Error> {
        if position >= 9 {
            return Err(crate::Error::InvalidPosition { position });
        }

        if !self.is_empty(position) {
            return Err(crate::Error::InvalidMove { position });
        }

        let mut next = *self;
        next.cells[position] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// The owner of a completed line, if any.
    ///
    /// Variant-independent: who this favors is decided by
    /// [`Variant::result`](super::Variant::result).
    pub fn line_owner(&self) -> Option<Player> {
        lines::line_owner(&self.cells)
    }

    /// Check if the game is over (completed line or full board)
    pub fn is_terminal(&self) -> bool {
        self.line_owner().is_some() || !self.cells.contains(&Cell::Empty)
    }

    /// Get a canonical string representation for use as a key
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            match self.to_move {
                Player::X => 'X',
                Player::O => 'O',
            }
        )
    }

    /// Check whether the state is reachable by legal alternating play.
    ///
    /// Validates piece counts, turn consistency, and that at most one player
    /// holds a completed line (with the line owner having moved last).
    pub fn is_valid(&self) -> bool {
        let (x, o) = Self::count_pieces(&self.cells);

        if !(x == o || x == o + 1 || o == x + 1) {
            return false;
        }

        let diff = x as isize - o as isize;
        match self.to_move {
            Player::X => {
                if !(diff == 0 || diff == -1) {
                    return false;
                }
            }
            Player::O => {
                if !(diff == 0 || diff == 1) {
                    return false;
                }
            }
        }

        let x_line = lines::has_line(&self.cells, Player::X);
        let o_line = lines::has_line(&self.cells, Player::O);

        if x_line && o_line {
            return false;
        }

        // The line owner moved last, so the recorded turn must be the opponent's
        if x_line && self.to_move != Player::O {
            return false;
        }
        if o_line && self.to_move != Player::X {
            return false;
        }

        true
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
