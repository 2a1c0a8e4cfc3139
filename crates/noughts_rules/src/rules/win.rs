//! Win detection.

use crate::{Board, Mark, Position, Square};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first line holding three equal marks, with that mark.
fn first_complete_line(board: &Board) -> Option<([Position; 3], Mark)> {
    LINES.into_iter().find_map(|line @ [a, b, c]| match board.get(a) {
        Square::Occupied(mark) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
            Some((line, mark))
        }
        _ => None,
    })
}

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first line (rows, columns, diagonals) holding
/// three equal marks, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    first_complete_line(board).map(|(_, mark)| mark)
}

/// Returns the positions of the first winning line, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    first_complete_line(board).map(|(line, _)| line)
}
