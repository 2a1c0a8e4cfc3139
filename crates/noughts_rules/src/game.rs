//! The game state and its transitions.

use crate::rules::next_player;
use crate::status::derive_status;
use crate::{Board, GameSnapshot, Mark, MoveError, Position, SavedGame, SnapshotError, Square};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Complete state of one game.
///
/// A `GameState` is never mutated in place: [`play`](Self::play) and
/// [`new`](Self::new) return fresh values, and `winner`, `is_draw`, `moves`
/// and `status` are always recomputed from the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    next_player: Mark,
    winner: Option<Mark>,
    is_draw: bool,
    moves: u8,
    status: String,
    updated_at: DateTime<Utc>,
}

impl GameState {
    /// Creates an empty game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self::derive(Board::new(), Mark::X, Utc::now())
    }

    fn derive(board: Board, next_player: Mark, updated_at: DateTime<Utc>) -> Self {
        let derived = derive_status(&board, next_player);
        Self {
            board,
            next_player,
            winner: derived.winner,
            is_draw: derived.is_draw,
            moves: derived.moves,
            status: derived.status,
            updated_at,
        }
    }

    /// Places the mark of the player to move at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game has a winner or is
    /// drawn, and [`MoveError::SquareOccupied`] if the square is taken.
    #[instrument(skip(self), fields(player = %self.next_player))]
    pub fn play(&self, position: Position) -> Result<Self, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied(position));
        }

        let mut board = self.board;
        board.set(position, Square::Occupied(self.next_player));
        let next = Self::derive(board, self.next_player.opponent(), Utc::now());

        debug!(status = %next.status, moves = next.moves, "Move applied");
        Ok(next)
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// Only the board is trusted: the turn is derived from the mark counts
    /// and the remaining fields are recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the mark counts cannot arise from a game
    /// where X moves first.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(
        snapshot: &GameSnapshot,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, SnapshotError> {
        let board = Board::from_marks(snapshot.board);
        let Some(turn) = next_player(&board) else {
            return Err(SnapshotError::new(format!(
                "impossible mark counts: {} X, {} O",
                board.count(Mark::X),
                board.count(Mark::O)
            )));
        };
        if turn != snapshot.next_player {
            debug!(
                claimed = %snapshot.next_player,
                derived = %turn,
                "Snapshot turn disagrees with board, using derived turn"
            );
        }
        Ok(Self::derive(board, turn, updated_at))
    }

    /// Returns the wire form of this game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_marks(),
            next_player: self.next_player,
            winner: self.winner,
            is_draw: self.is_draw,
            moves: self.moves,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next.
    pub fn next_player(&self) -> Mark {
        self.next_player
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Returns true if the game ended in a draw.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// Returns the number of filled squares.
    pub fn moves(&self) -> u8 {
        self.moves
    }

    /// Returns the derived status text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns when this state was produced.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True once there is a winner or a draw.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_draw
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<SavedGame> for GameState {
    type Error = SnapshotError;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        Self::from_snapshot(&saved.snapshot, saved.updated_at.unwrap_or_else(Utc::now))
    }
}
