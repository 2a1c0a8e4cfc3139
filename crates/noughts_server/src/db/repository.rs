//! Game repository over SQLite.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use noughts_rules::GameState;
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, GameRecord, NewGameRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Stores and retrieves saved games.
///
/// Opens a connection per call; all methods block and belong on
/// `spawn_blocking` when called from async code.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for the database file at `db_path`.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating GameRepository");
        Self { db_path }
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connect,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Applies pending schema migrations, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migrate, format!("Migrations failed: {e}")))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Stores a game and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, state), fields(moves = state.moves()))]
    pub fn save(&self, state: &GameState) -> Result<GameRecord, DbError> {
        let mut conn = self.connection()?;
        let record = diesel::insert_into(schema::games::table)
            .values(&NewGameRecord::from_state(state))
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(id = record.id(), moves = record.moves(), "Game saved");
        Ok(record)
    }

    /// Returns the most recently saved game, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn latest(&self) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;
        let record = schema::games::table
            .order(schema::games::id.desc())
            .select(GameRecord::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = record.is_some(), "Latest game lookup");
        Ok(record)
    }
}
