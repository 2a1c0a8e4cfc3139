//! Storage errors.

use derive_more::{Display, Error};

/// Which storage step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// The database file could not be opened.
    #[display("connect")]
    Connect,
    /// Schema migrations failed.
    #[display("migrate")]
    Migrate,
    /// A query failed.
    #[display("query")]
    Query,
    /// A stored row does not decode into a game.
    #[display("decode")]
    Decode,
    /// The blocking task running the query died.
    #[display("task")]
    Task,
}

/// Storage failure, tagged with its kind and the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error ({}): {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failed step.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error of `kind` at the caller's location.
    #[track_caller]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<tokio::task::JoinError> for DbError {
    #[track_caller]
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(DbErrorKind::Task, err.to_string())
    }
}
