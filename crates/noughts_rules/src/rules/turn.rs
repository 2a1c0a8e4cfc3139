//! Turn derivation.

use crate::{Board, Mark};
use tracing::instrument;

/// Derives whose turn it is from the marks on the board.
///
/// X always moves first, so X is to move when both marks appear equally
/// often and O when X is one ahead. Any other count cannot arise from play
/// and yields `None`.
#[instrument(skip(board))]
pub fn next_player(board: &Board) -> Option<Mark> {
    let x = board.count(Mark::X);
    let o = board.count(Mark::O);
    if x == o {
        Some(Mark::X)
    } else if x == o + 1 {
        Some(Mark::O)
    } else {
        None
    }
}
