//! Best-effort remote sync facade.

use crate::saver::{self, SaverHandle, set_connectivity};
use crate::{Connectivity, GameApiClient, SyncConfig, SyncError};
use noughts_rules::GameState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Loads and saves games without ever failing the caller.
///
/// Every failure is logged and folded into the [`Connectivity`] flag.
#[derive(Debug)]
pub struct RemoteSync {
    client: Option<GameApiClient>,
    debounce: Duration,
    status: Arc<watch::Sender<Connectivity>>,
}

impl RemoteSync {
    /// Builds the sync layer from configuration.
    ///
    /// Without a base URL, or if the HTTP client cannot be built, sync is
    /// disabled.
    #[instrument(skip(config), fields(enabled = config.is_enabled()))]
    pub fn from_config(config: &SyncConfig) -> Self {
        let client = match config.base_url() {
            None => {
                info!("No API URL configured, remote sync disabled");
                None
            }
            Some(url) => match GameApiClient::new(url, config.request_timeout()) {
                Ok(client) => {
                    info!(base_url = %url, "Remote sync enabled");
                    Some(client)
                }
                Err(e) => {
                    warn!(error = %e, "Could not build HTTP client, remote sync disabled");
                    None
                }
            },
        };
        Self::with_client(client, config.debounce())
    }

    /// Sync that never touches the network.
    pub fn disabled() -> Self {
        Self::with_client(None, SyncConfig::default().debounce())
    }

    fn with_client(client: Option<GameApiClient>, debounce: Duration) -> Self {
        let initial = if client.is_some() {
            Connectivity::Connecting
        } else {
            Connectivity::Disabled
        };
        let (status, _) = watch::channel(initial);
        Self {
            client,
            debounce,
            status: Arc::new(status),
        }
    }

    /// True when a backend is configured.
    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Subscribes to connectivity changes.
    pub fn connectivity(&self) -> watch::Receiver<Connectivity> {
        self.status.subscribe()
    }

    /// Current connectivity.
    pub fn current_connectivity(&self) -> Connectivity {
        *self.status.borrow()
    }

    /// Loads the latest saved game.
    ///
    /// Returns `None` when sync is disabled, nothing was saved, or anything
    /// at all goes wrong.
    #[instrument(skip(self))]
    pub async fn load_latest(&self) -> Option<GameState> {
        let client = self.client.as_ref()?;

        let loaded = match client.fetch_latest().await {
            Ok(Some(saved)) => GameState::try_from(saved).map(Some).map_err(SyncError::from),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match loaded {
            Ok(state) => {
                debug!(found = state.is_some(), "Latest game loaded");
                set_connectivity(&self.status, Connectivity::Online);
                state
            }
            Err(SyncError::Snapshot(e)) => {
                warn!(error = %e, "Ignoring unplayable saved game");
                set_connectivity(&self.status, Connectivity::Online);
                None
            }
            Err(e) => {
                warn!(error = %e, "Could not load latest game");
                set_connectivity(&self.status, Connectivity::Offline);
                None
            }
        }
    }

    /// Starts saving every change seen on `states`, debounced.
    ///
    /// Returns `None` when sync is disabled. Must be called inside a Tokio
    /// runtime.
    #[instrument(skip(self, states))]
    pub fn spawn_saver(&self, states: watch::Receiver<GameState>) -> Option<SaverHandle> {
        let client = self.client.clone()?;
        Some(saver::spawn(
            client,
            self.debounce,
            states,
            Arc::clone(&self.status),
        ))
    }
}
