//! Pure tic-tac-toe rules.
//!
//! Everything in this crate is a closed-form evaluation over a fixed 3x3
//! board: no I/O, no clocks other than the `updated_at` stamp on
//! [`GameState`], and no interior mutability.
//!
//! # Example
//!
//! ```
//! use noughts_rules::{GameState, Mark, Position};
//!
//! let game = GameState::new();
//! let game = game.play(Position::Center).unwrap();
//! assert_eq!(game.next_player(), Mark::O);
//! assert_eq!(game.status(), "Next player: O");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod position;
mod rules;
mod snapshot;
mod status;
mod types;

pub use error::{MoveError, SnapshotError};
pub use game::GameState;
pub use position::Position;
pub use rules::{check_winner, is_draw, is_full, next_player, winning_line};
pub use snapshot::{GameSnapshot, SavedGame};
pub use status::{DerivedStatus, derive_status};
pub use types::{Board, Mark, Square};
