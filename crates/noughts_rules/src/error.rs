//! Error types for move handling and snapshot decoding.

use crate::Position;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game already has a winner or is drawn.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// A snapshot that cannot describe a reachable game.
#[derive(Debug, Clone, Display, Error)]
#[display("Snapshot error: {} at {}:{}", message, file, line)]
pub struct SnapshotError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SnapshotError {
    /// Creates a new snapshot error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
