//! SQLite persistence for saved games.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{GameRecord, NewGameRecord};
pub use repository::GameRepository;
