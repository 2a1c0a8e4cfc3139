//! The state container: one game, published to whoever watches it.

use noughts_rules::{GameState, Position};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// Holds the current game and notifies subscribers on every change.
///
/// The game is replaced wholesale on each accepted move, on reset and on a
/// remote load. Rejected moves publish nothing.
#[derive(Debug)]
pub struct GameController {
    state: watch::Sender<GameState>,
}

impl GameController {
    /// Creates a controller holding an empty game.
    #[instrument]
    pub fn new() -> Self {
        Self::with_state(GameState::new())
    }

    /// Creates a controller holding `state`.
    pub fn with_state(state: GameState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { state: tx }
    }

    /// Returns a copy of the current game.
    pub fn current(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Subscribes to changes. The current game counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.subscribe()
    }

    /// Plays the next mark at `position`.
    ///
    /// Returns false and leaves the game untouched if the square is taken
    /// or the game is over.
    #[instrument(skip(self))]
    pub fn play(&self, position: Position) -> bool {
        let next = self.state.borrow().play(position);
        match next {
            Ok(next) => {
                debug!(status = %next.status(), "Move accepted");
                self.state.send_replace(next);
                true
            }
            Err(e) => {
                debug!(error = %e, "Move ignored");
                false
            }
        }
    }

    /// Plays the cell at board index `index` (0-8). Out-of-range indices are
    /// ignored.
    #[instrument(skip(self))]
    pub fn play_cell(&self, index: usize) -> bool {
        match Position::from_index(index) {
            Some(position) => self.play(position),
            None => {
                debug!("Cell index out of range, ignored");
                false
            }
        }
    }

    /// Starts a new empty game.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        info!("Game reset");
        self.state.send_replace(GameState::new());
    }

    /// Replaces the game wholesale, e.g. after loading it remotely.
    #[instrument(skip(self, state), fields(moves = state.moves()))]
    pub fn replace(&self, state: GameState) {
        info!(status = %state.status(), "Game replaced");
        self.state.send_replace(state);
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_rules::Mark;

    #[test]
    fn test_accepted_move_notifies() {
        let controller = GameController::new();
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        assert!(controller.play(Position::Center));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().next_player(), Mark::O);
    }

    #[test]
    fn test_rejected_move_is_silent() {
        let controller = GameController::new();
        controller.play(Position::Center);
        let mut rx = controller.subscribe();
        let before = controller.current();

        assert!(!controller.play(Position::Center));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(controller.current(), before);
        let _ = rx.borrow_and_update();
    }

    #[test]
    fn test_out_of_range_cell_ignored() {
        let controller = GameController::new();
        assert!(!controller.play_cell(9));
        assert_eq!(controller.current().moves(), 0);
    }

    #[test]
    fn test_reset_after_moves() {
        let controller = GameController::new();
        controller.play_cell(0);
        controller.play_cell(4);
        controller.reset();

        let game = controller.current();
        assert_eq!(game.moves(), 0);
        assert_eq!(game.next_player(), Mark::X);
        assert_eq!(game.winner(), None);
        assert!(!game.is_draw());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let controller = GameController::new();
        let loaded = GameState::new()
            .play(Position::TopLeft)
            .unwrap()
            .play(Position::TopRight)
            .unwrap();
        controller.replace(loaded.clone());
        assert_eq!(controller.current(), loaded);
    }
}
