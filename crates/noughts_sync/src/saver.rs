//! Debounced background saver.

use crate::{Connectivity, GameApiClient};
use noughts_rules::GameState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

/// Owns the saver task. Dropping the handle stops it.
#[derive(Debug)]
pub struct SaverHandle {
    task: JoinHandle<()>,
}

impl SaverHandle {
    /// True once the task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SaverHandle {
    fn drop(&mut self) {
        debug!("Stopping saver task");
        self.task.abort();
    }
}

/// Spawns the saver on the current Tokio runtime.
pub(crate) fn spawn(
    client: GameApiClient,
    quiet: Duration,
    states: watch::Receiver<GameState>,
    status: Arc<watch::Sender<Connectivity>>,
) -> SaverHandle {
    let task = tokio::spawn(run(client, quiet, states, status));
    SaverHandle { task }
}

#[instrument(skip_all, fields(base_url = %client.base_url(), quiet_ms = quiet.as_millis() as u64))]
async fn run(
    client: GameApiClient,
    quiet: Duration,
    mut states: watch::Receiver<GameState>,
    status: Arc<watch::Sender<Connectivity>>,
) {
    info!("Saver started");

    while states.changed().await.is_ok() {
        if !wait_for_quiet(&mut states, quiet).await {
            break;
        }

        let snapshot = states.borrow_and_update().snapshot();
        match client.save(&snapshot).await {
            Ok(saved) => {
                debug!(id = ?saved.id, moves = snapshot.moves, "Game saved");
                set_connectivity(&status, Connectivity::Online);
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                set_connectivity(&status, Connectivity::Offline);
            }
        }
    }

    info!("Game state closed, saver stopping");
}

/// Waits until no change arrives for `quiet`. Each change restarts the wait.
///
/// Returns false if the state container went away.
async fn wait_for_quiet(states: &mut watch::Receiver<GameState>, quiet: Duration) -> bool {
    loop {
        match tokio::time::timeout(quiet, states.changed()).await {
            Ok(Ok(())) => trace!("Pending save superseded"),
            Ok(Err(_)) => return false,
            Err(_) => return true,
        }
    }
}

/// Publishes `next`, notifying watchers only on an actual change.
pub(crate) fn set_connectivity(status: &watch::Sender<Connectivity>, next: Connectivity) {
    status.send_if_modified(|current| {
        let changed = *current != next;
        *current = next;
        changed
    });
}
