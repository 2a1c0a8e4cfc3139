//! Noughts: tic-tac-toe in the terminal, with optional remote save.
//!
//! # Architecture
//!
//! - **Rules** (`noughts_rules`): pure board evaluation and move handling
//! - **Controller**: holds the current game and publishes every change
//! - **Sync** (`noughts_sync`): loads the latest game and saves changes after a quiet period
//! - **Server** (`noughts_server`): reference REST backend over SQLite
//! - **TUI**: keyboard-driven board rendered with ratatui
//!
//! # Example
//!
//! ```
//! use noughts::GameController;
//! use noughts_rules::Position;
//!
//! let controller = GameController::new();
//! assert!(controller.play(Position::Center));
//! assert!(!controller.play(Position::Center));
//! assert_eq!(controller.current().status(), "Next player: O");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod controller;
mod tui;

pub use cli::{Cli, Command, PlayArgs, ServeArgs};
pub use controller::GameController;
pub use tui::{App, run_tui};
