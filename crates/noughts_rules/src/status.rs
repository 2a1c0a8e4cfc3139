//! Derived status: everything that follows from the board and the turn.

use crate::rules::{check_winner, is_full};
use crate::{Board, Mark};
use tracing::instrument;

/// Fields computed solely from a board and whose turn is next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStatus {
    /// Human-readable status line.
    pub status: String,
    /// Winning mark, if any.
    pub winner: Option<Mark>,
    /// True when the board is full and nobody won.
    pub is_draw: bool,
    /// Number of filled squares.
    pub moves: u8,
}

/// Derives status text, winner, draw flag and move count.
///
/// Pure: the same board and turn always give the same result. `winner` and
/// `is_draw` are never both set.
#[instrument(skip(board), fields(next_player = %next_player))]
pub fn derive_status(board: &Board, next_player: Mark) -> DerivedStatus {
    let winner = check_winner(board);
    let is_draw = winner.is_none() && is_full(board);
    let status = match winner {
        Some(mark) => format!("Winner: {}", mark),
        None if is_draw => "Draw".to_string(),
        None => format!("Next player: {}", next_player),
    };

    DerivedStatus {
        status,
        winner,
        is_draw,
        moves: board.filled(),
    }
}
