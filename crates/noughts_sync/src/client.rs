//! HTTP client for the persistence backend.

use crate::SyncError;
use noughts_rules::{GameSnapshot, SavedGame};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument};

/// Typed client for `GET /api/games/latest` and `POST /api/games`.
#[derive(Debug, Clone)]
pub struct GameApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the HTTP client cannot be built.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the most recently saved game.
    ///
    /// `404` and a JSON `null` body both mean nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure, any other non-success
    /// status, or an undecodable body.
    #[instrument(skip(self))]
    pub async fn fetch_latest(&self) -> Result<Option<SavedGame>, SyncError> {
        let url = format!("{}/api/games/latest", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        debug!(status = %status, "Latest game response");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        Ok(response.json::<Option<SavedGame>>().await?)
    }

    /// Saves a game.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure, a non-success status, or
    /// an undecodable body.
    #[instrument(skip(self, snapshot), fields(moves = snapshot.moves))]
    pub async fn save(&self, snapshot: &GameSnapshot) -> Result<SavedGame, SyncError> {
        let url = format!("{}/api/games", self.base_url);
        let response = self.client.post(&url).json(snapshot).send().await?;

        let status = response.status();
        debug!(status = %status, "Save response");
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        Ok(response.json::<SavedGame>().await?)
    }
}
