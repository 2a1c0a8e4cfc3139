//! Database models and their mapping to wire snapshots.

use chrono::{NaiveDateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use noughts_rules::{GameSnapshot, GameState, Mark, SavedGame};
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};

const EMPTY_CELL: char = '-';

/// A stored game.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: i32,
    board: String,
    next_player: String,
    winner: Option<String>,
    is_draw: bool,
    moves: i32,
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Converts the stored row into the wire form.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a stored column does not decode.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn to_saved(&self) -> Result<SavedGame, DbError> {
        let snapshot = GameSnapshot {
            board: decode_board(&self.board)?,
            next_player: decode_mark(&self.next_player)?,
            winner: self.winner.as_deref().map(decode_mark).transpose()?,
            is_draw: self.is_draw,
            moves: u8::try_from(self.moves).map_err(|_| {
                DbError::new(
                    DbErrorKind::Decode,
                    format!("Invalid move count: {}", self.moves),
                )
            })?,
        };
        Ok(SavedGame {
            id: Some(i64::from(self.id)),
            snapshot,
            updated_at: Some(self.updated_at.and_utc()),
        })
    }
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    board: String,
    next_player: String,
    winner: Option<String>,
    is_draw: bool,
    moves: i32,
    updated_at: NaiveDateTime,
}

impl NewGameRecord {
    /// Builds a row from a validated game, stamped with the current time.
    #[instrument(skip(state), fields(moves = state.moves()))]
    pub fn from_state(state: &GameState) -> Self {
        Self::new(
            encode_board(&state.board().to_marks()),
            state.next_player().to_string(),
            state.winner().map(|mark| mark.to_string()),
            state.is_draw(),
            i32::from(state.moves()),
            Utc::now().naive_utc(),
        )
    }
}

/// Encodes a board as nine characters: `X`, `O` or `-`.
fn encode_board(marks: &[Option<Mark>; 9]) -> String {
    marks
        .iter()
        .map(|cell| match cell {
            Some(Mark::X) => 'X',
            Some(Mark::O) => 'O',
            None => EMPTY_CELL,
        })
        .collect()
}

fn decode_board(encoded: &str) -> Result<[Option<Mark>; 9], DbError> {
    let chars: Vec<char> = encoded.chars().collect();
    if chars.len() != 9 {
        return Err(DbError::new(
            DbErrorKind::Decode,
            format!("Invalid board '{}'", encoded),
        ));
    }

    let mut board = [None; 9];
    for (cell, c) in board.iter_mut().zip(chars) {
        *cell = match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            EMPTY_CELL => None,
            other => {
                return Err(DbError::new(DbErrorKind::Decode, format!(
                    "Invalid cell '{}' in board '{}'",
                    other, encoded
                )));
            }
        };
    }
    Ok(board)
}

fn decode_mark(s: &str) -> Result<Mark, DbError> {
    Mark::from_symbol(s)
        .ok_or_else(|| DbError::new(DbErrorKind::Decode, format!("Invalid mark '{}'", s)))
}
