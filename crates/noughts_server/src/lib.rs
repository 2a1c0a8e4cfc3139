//! Reference persistence backend for noughts.
//!
//! Serves `GET /api/games/latest` and `POST /api/games` over a SQLite file.
//! Snapshots are validated and normalised before they are stored: only the
//! board is trusted, everything else is recomputed.
//!
//! # Example
//!
//! ```no_run
//! use noughts_server::{GameRepository, serve};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = GameRepository::new("noughts.db".to_string());
//! repository.run_migrations()?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! serve(listener, repository, std::future::pending()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod db;

pub use api::router;
pub use db::{DbError, DbErrorKind, GameRecord, GameRepository, NewGameRecord};

use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Serves the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
#[instrument(skip_all, fields(addr = ?listener.local_addr().ok()))]
pub async fn serve(
    listener: TcpListener,
    repository: GameRepository,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!("Persistence server listening");
    axum::serve(listener, router(repository))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Persistence server stopped");
    Ok(())
}
