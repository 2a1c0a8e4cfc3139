//! Errors from talking to the persistence backend.
//!
//! These never reach the player: [`RemoteSync`](crate::RemoteSync) maps
//! every one of them to [`Connectivity::Offline`](crate::Connectivity) or
//! to "no data".

use derive_more::Display;
use noughts_rules::SnapshotError;

/// A failed backend call.
#[derive(Debug, Display)]
pub enum SyncError {
    /// The request could not be sent or the body could not be read.
    #[display("HTTP error: {}", _0)]
    Http(reqwest::Error),

    /// The backend answered with a non-success status.
    #[display("Backend returned status {}", _0)]
    Status(u16),

    /// The backend returned a game that cannot be played.
    #[display("Invalid game from backend: {}", _0)]
    Snapshot(SnapshotError),
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Http(e) => Some(e),
            SyncError::Status(_) => None,
            SyncError::Snapshot(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<SnapshotError> for SyncError {
    fn from(err: SnapshotError) -> Self {
        Self::Snapshot(err)
    }
}
