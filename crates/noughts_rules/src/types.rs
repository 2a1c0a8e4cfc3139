//! Core domain types for tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A mark placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Parses a mark from its wire form (`"X"` or `"O"`, case-insensitive).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        symbol.trim().parse().ok()
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Square {
    fn from(mark: Option<Mark>) -> Self {
        mark.map_or(Square::Empty, Square::Occupied)
    }
}

/// 3x3 board, squares in row-major order (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from one optional mark per cell.
    pub fn from_marks(marks: [Option<Mark>; 9]) -> Self {
        Self {
            squares: marks.map(Square::from),
        }
    }

    /// Returns one optional mark per cell.
    pub fn to_marks(&self) -> [Option<Mark>; 9] {
        self.squares.map(Square::mark)
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    pub fn with(mut self, pos: Position, mark: Mark) -> Self {
        self.set(pos, Square::Occupied(mark));
        self
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of non-empty squares.
    pub fn filled(&self) -> u8 {
        self.squares.iter().filter(|s| **s != Square::Empty).count() as u8
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> u8 {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_mark_from_symbol() {
        assert_eq!(Mark::from_symbol("X"), Some(Mark::X));
        assert_eq!(Mark::from_symbol(" o "), Some(Mark::O));
        assert_eq!(Mark::from_symbol(""), None);
        assert_eq!(Mark::from_symbol("Z"), None);
    }

    #[test]
    fn test_counts() {
        let board = Board::new()
            .with(Position::TopLeft, Mark::X)
            .with(Position::Center, Mark::O)
            .with(Position::BottomRight, Mark::X);
        assert_eq!(board.filled(), 3);
        assert_eq!(board.count(Mark::X), 2);
        assert_eq!(board.count(Mark::O), 1);
    }

    #[test]
    fn test_marks_conversion_keeps_order() {
        let mut marks = [None; 9];
        marks[2] = Some(Mark::O);
        marks[6] = Some(Mark::X);
        let board = Board::from_marks(marks);
        assert_eq!(board.get(Position::TopRight), Square::Occupied(Mark::O));
        assert_eq!(board.get(Position::BottomLeft), Square::Occupied(Mark::X));
        assert_eq!(board.to_marks(), marks);
    }

}
