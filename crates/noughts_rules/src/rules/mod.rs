//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so that the state container, the sync layer and the server
//! all evaluate boards the same way.

mod draw;
mod turn;
mod win;

pub use draw::{is_draw, is_full};
pub use turn::next_player;
pub use win::{check_winner, winning_line};
