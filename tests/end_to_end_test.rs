//! Full loop: controller, debounced saver and the real backend.

use noughts::GameController;
use noughts_rules::{Mark, Position};
use noughts_server::GameRepository;
use noughts_sync::{Connectivity, RemoteSync, SyncConfig};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::sync::oneshot;

struct Backend {
    url: String,
    repository: GameRepository,
    _db: NamedTempFile,
    _stop: oneshot::Sender<()>,
}

async fn start_backend() -> Backend {
    let db = NamedTempFile::new().expect("Failed to create temp file");
    let repository = GameRepository::new(db.path().to_str().expect("Invalid path").to_string());
    repository.run_migrations().expect("Migrations failed");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();
    let served = repository.clone();
    tokio::spawn(async move {
        noughts_server::serve(listener, served, async {
            let _ = stopped.await;
        })
        .await
        .unwrap();
    });

    Backend {
        url,
        repository,
        _db: db,
        _stop: stop,
    }
}

fn sync_for(url: &str) -> RemoteSync {
    let config = SyncConfig::default()
        .with_api_base_url(Some(url.to_string()))
        .with_debounce_ms(Some(50));
    RemoteSync::from_config(&config)
}

#[tokio::test]
async fn test_played_game_is_saved_and_restored() {
    let backend = start_backend().await;

    let sync = sync_for(&backend.url);
    assert_eq!(sync.current_connectivity(), Connectivity::Connecting);
    assert!(sync.load_latest().await.is_none());
    assert_eq!(sync.current_connectivity(), Connectivity::Online);

    let controller = GameController::new();
    let saver = sync.spawn_saver(controller.subscribe()).expect("Sync enabled");
    for cell in [0, 4, 1, 3, 2] {
        assert!(controller.play_cell(cell));
    }
    tokio::time::sleep(Duration::from_millis(500)).await;
    drop(saver);

    let stored = backend
        .repository
        .latest()
        .expect("Query failed")
        .expect("A game should be stored")
        .to_saved()
        .expect("Row should decode");
    assert_eq!(stored.snapshot, controller.current().snapshot());
    assert_eq!(stored.snapshot.winner, Some(Mark::X));

    // A second session picks up where the first left off
    let restored = sync_for(&backend.url)
        .load_latest()
        .await
        .expect("Latest game should load");
    assert_eq!(restored.board(), controller.current().board());
    assert_eq!(restored.status(), "Winner: X");
}

#[tokio::test]
async fn test_restored_game_continues() {
    let backend = start_backend().await;
    let first = GameController::new();
    first.play(Position::Center);
    first.play(Position::TopLeft);
    backend.repository.save(&first.current()).expect("Save failed");

    let sync = sync_for(&backend.url);
    let controller = GameController::new();
    if let Some(game) = sync.load_latest().await {
        controller.replace(game);
    }
    assert_eq!(controller.current().moves(), 2);
    assert_eq!(controller.current().next_player(), Mark::X);
    assert!(!controller.play(Position::Center));
    assert!(controller.play(Position::BottomRight));
}

#[tokio::test]
async fn test_unreachable_backend_keeps_game_playable() {
    let url = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let sync = sync_for(&url);
    assert!(sync.load_latest().await.is_none());
    assert_eq!(sync.current_connectivity(), Connectivity::Offline);

    let controller = GameController::new();
    let _saver = sync.spawn_saver(controller.subscribe());
    assert!(controller.play(Position::Center));
    assert!(controller.play(Position::TopLeft));
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(controller.current().moves(), 2);
    assert_eq!(controller.current().status(), "Next player: X");
    assert_eq!(sync.current_connectivity(), Connectivity::Offline);
}

#[tokio::test]
async fn test_disabled_sync_never_saves() {
    let sync = RemoteSync::from_config(&SyncConfig::default());
    assert_eq!(sync.current_connectivity(), Connectivity::Disabled);
    assert!(sync.load_latest().await.is_none());

    let controller = GameController::new();
    assert!(sync.spawn_saver(controller.subscribe()).is_none());
    assert!(controller.play(Position::Center));
}
