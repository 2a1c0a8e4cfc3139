//! Application state and key handling.

use crossterm::event::KeyCode;
use noughts_rules::{GameState, Position};
use noughts_sync::Connectivity;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use super::input::{digit_cell, move_cursor};
use crate::GameController;

/// Main application state.
#[derive(Debug)]
pub struct App {
    controller: GameController,
    states: watch::Receiver<GameState>,
    connectivity: watch::Receiver<Connectivity>,
    cursor: Position,
    should_quit: bool,
}

impl App {
    /// Creates the app around `controller`, watching `connectivity`.
    pub fn new(controller: GameController, connectivity: watch::Receiver<Connectivity>) -> Self {
        let states = controller.subscribe();
        Self {
            controller,
            states,
            connectivity,
            cursor: Position::Center,
            should_quit: false,
        }
    }

    /// The game being played.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Last known backend state.
    pub fn connectivity(&self) -> Connectivity {
        *self.connectivity.borrow()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Reports whether the game or connectivity changed since the last call.
    pub fn take_changes(&mut self) -> bool {
        let game = self.states.has_changed().unwrap_or(false);
        let link = self.connectivity.has_changed().unwrap_or(false);
        if game {
            self.states.mark_unchanged();
        }
        if link {
            self.connectivity.mark_unchanged();
        }
        game || link
    }

    /// Applies one key press.
    #[instrument(skip(self), fields(cursor = %self.cursor))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.controller.reset(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.controller.play(self.cursor);
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            other => match digit_cell(other) {
                Some(index) => {
                    if self.controller.play_cell(index) {
                        if let Some(position) = Position::from_index(index) {
                            self.cursor = position;
                        }
                    }
                }
                None => debug!(key = ?other, "Unbound key"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_rules::Mark;

    fn app() -> App {
        let (_tx, rx) = watch::channel(Connectivity::Disabled);
        App::new(GameController::new(), rx)
    }

    #[test]
    fn test_enter_plays_under_cursor() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        let game = app.controller().current();
        assert_eq!(game.board().get(Position::Center).mark(), Some(Mark::X));
        assert_eq!(game.next_player(), Mark::O);
    }

    #[test]
    fn test_digit_plays_and_moves_cursor() {
        let mut app = app();
        app.handle_key(KeyCode::Char('7'));
        assert_eq!(app.cursor(), Position::BottomLeft);
        assert_eq!(
            app.controller().current().board().get(Position::BottomLeft).mark(),
            Some(Mark::X)
        );
    }

    #[test]
    fn test_occupied_square_is_ignored() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.controller().current().moves(), 1);
    }

    #[test]
    fn test_arrows_then_reset() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.cursor(), Position::TopLeft);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.controller().current().moves(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_changes_are_reported_once() {
        let (tx, rx) = watch::channel(Connectivity::Connecting);
        let mut app = App::new(GameController::new(), rx);
        assert!(!app.take_changes());

        app.handle_key(KeyCode::Enter);
        assert!(app.take_changes());
        assert!(!app.take_changes());

        tx.send_replace(Connectivity::Online);
        assert!(app.take_changes());
        assert_eq!(app.connectivity(), Connectivity::Online);
    }
}
