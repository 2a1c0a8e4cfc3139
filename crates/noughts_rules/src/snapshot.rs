//! Wire form of a game, as exchanged with the persistence backend.

use crate::Mark;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/games`.
///
/// Cells are `"X"`, `"O"` or `null`; an empty string is also read as an
/// empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Nine cells in row-major order.
    #[serde(with = "cells")]
    pub board: [Option<Mark>; 9],
    /// Mark to move next.
    pub next_player: Mark,
    /// Winning mark, if any.
    #[serde(default)]
    pub winner: Option<Mark>,
    /// Whether the game is drawn.
    #[serde(default)]
    pub is_draw: bool,
    /// Number of filled cells.
    #[serde(default)]
    pub moves: u8,
}

/// A snapshot as returned by the backend after saving or loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Backend identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The saved game.
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
    /// When the backend stored it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

mod cells {
    use crate::Mark;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        board: &[Option<Mark>; 9],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        board.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[Option<Mark>; 9], D::Error> {
        let raw = Vec::<Option<String>>::deserialize(deserializer)?;
        if raw.len() != 9 {
            return Err(D::Error::invalid_length(raw.len(), &"a board of 9 cells"));
        }

        let mut board = [None; 9];
        for (cell, value) in board.iter_mut().zip(raw) {
            *cell = match value.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(symbol) => Some(Mark::from_symbol(symbol).ok_or_else(|| {
                    D::Error::custom(format!("invalid cell value '{}'", symbol))
                })?),
            };
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_body_shape() {
        let mut board = [None; 9];
        board[0] = Some(Mark::X);
        let snapshot = GameSnapshot {
            board,
            next_player: Mark::O,
            winner: None,
            is_draw: false,
            moves: 1,
        };
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "board": ["X", null, null, null, null, null, null, null, null],
                "next_player": "O",
                "winner": null,
                "is_draw": false,
                "moves": 1
            })
        );
    }

    #[test]
    fn test_empty_strings_are_empty_cells() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "board": ["X", "", "", "", "O", "", "", "", ""],
            "next_player": "X",
            "winner": null,
            "is_draw": false,
            "moves": 2
        }))
        .unwrap();
        assert_eq!(snapshot.board[0], Some(Mark::X));
        assert_eq!(snapshot.board[1], None);
        assert_eq!(snapshot.board[4], Some(Mark::O));
    }

    #[test]
    fn test_wrong_board_length_rejected() {
        let result = serde_json::from_value::<GameSnapshot>(json!({
            "board": ["X", null],
            "next_player": "O"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_cell_rejected() {
        let result = serde_json::from_value::<GameSnapshot>(json!({
            "board": ["Z", null, null, null, null, null, null, null, null],
            "next_player": "O"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_saved_game_flattens_snapshot() {
        let saved: SavedGame = serde_json::from_value(json!({
            "id": 7,
            "board": [null, null, null, null, "X", null, null, null, null],
            "next_player": "O",
            "winner": null,
            "is_draw": false,
            "moves": 1,
            "updated_at": "2026-10-16T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(saved.id, Some(7));
        assert_eq!(saved.snapshot.board[4], Some(Mark::X));
        assert_eq!(saved.snapshot.moves, 1);
        assert!(saved.updated_at.is_some());
    }
}
