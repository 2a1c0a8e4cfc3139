//! Tests for the SQLite game repository.

use noughts_rules::{GameState, Mark, Position};
use noughts_server::GameRepository;
use tempfile::NamedTempFile;

/// Creates a migrated database in a temp file. The file handle must stay in
/// scope to keep the database alive.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path);
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

#[test]
fn test_latest_on_empty_database() {
    let (_db, repo) = setup_test_db();
    assert!(repo.latest().expect("Query failed").is_none());
}

#[test]
fn test_migrations_are_idempotent() {
    let (_db, repo) = setup_test_db();
    repo.run_migrations().expect("Second run failed");
}

#[test]
fn test_save_and_load_latest() {
    let (_db, repo) = setup_test_db();
    let game = GameState::new()
        .play(Position::TopLeft)
        .unwrap()
        .play(Position::Center)
        .unwrap();

    let saved = repo.save(&game).expect("Save failed");
    assert!(*saved.id() > 0);
    assert_eq!(saved.board(), "X---O----");
    assert_eq!(*saved.moves(), 2);

    let latest = repo
        .latest()
        .expect("Query failed")
        .expect("A game should be stored");
    let wire = latest.to_saved().expect("Row should decode");
    assert_eq!(wire.snapshot, game.snapshot());
}

#[test]
fn test_latest_is_most_recent_save() {
    let (_db, repo) = setup_test_db();
    let first = GameState::new().play(Position::Center).unwrap();
    let second = first.play(Position::BottomRight).unwrap();

    repo.save(&first).expect("Save failed");
    let last = repo.save(&second).expect("Save failed");

    let latest = repo.latest().expect("Query failed").expect("Stored");
    assert_eq!(latest.id(), last.id());
    assert_eq!(*latest.moves(), 2);
}

#[test]
fn test_finished_game_round_trips_winner() {
    let (_db, repo) = setup_test_db();
    let game = [0, 4, 1, 3, 2].into_iter().fold(GameState::new(), |g, i| {
        g.play(Position::from_index(i).unwrap()).unwrap()
    });

    repo.save(&game).expect("Save failed");
    let wire = repo
        .latest()
        .expect("Query failed")
        .expect("Stored")
        .to_saved()
        .expect("Row should decode");
    assert_eq!(wire.snapshot.winner, Some(Mark::X));
    assert!(!wire.snapshot.is_draw);
}
