//! Integration tests for the repository, file store and server config.

use bracket_maker::config::ServerConfig;
use bracket_maker::{
    advance_round, create_tournament, record_winner, FileStore, Snapshot, StoreError, Tournament,
    TournamentError, TournamentRepository,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

fn tournament(name: &str) -> Tournament {
    create_tournament(name, &["A", "B", "C"], &["A", "B"], &mut StdRng::seed_from_u64(1)).unwrap()
}

fn temp_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("bracket-maker-{}", Uuid::new_v4()))
        .join("tournaments.json")
}

#[test]
fn newest_tournament_first() {
    let mut repo = TournamentRepository::new();
    let first = repo.insert(tournament("First"));
    let second = repo.insert(tournament("Second"));
    let ids: Vec<_> = repo.all().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(repo.get(first).map(|t| t.name.as_str()), Some("First"));
}

#[test]
fn soft_delete_moves_and_stamps() {
    let mut repo = TournamentRepository::new();
    let id = repo.insert(tournament("Gone"));
    let keep = repo.insert(tournament("Kept"));

    let deleted = repo.delete(id).unwrap();
    assert!(deleted.deleted_at.is_some());
    assert_eq!(deleted.name, "Gone");
    assert!(repo.get(id).is_none());
    assert_eq!(repo.deleted().len(), 1);
    assert_eq!(repo.all().len(), 1);
    assert_eq!(repo.all()[0].id, keep);

    assert_eq!(
        repo.delete(id).map(|t| t.id),
        Err(TournamentError::TournamentNotFound(id))
    );
}

#[test]
fn active_and_completed_partition() {
    let mut repo = TournamentRepository::new();
    let done = repo.insert(create_tournament("Duel", &["X", "Y"], &["X", "Y"], &mut StdRng::seed_from_u64(2)).unwrap());
    repo.insert(tournament("Open"));

    repo.with_tournament(done, |t| {
        let m = t.matches[0].clone();
        record_winner(t, m.id, m.slot_b)?;
        advance_round(t)
    })
    .unwrap();

    assert_eq!(repo.active().count(), 1);
    let completed: Vec<_> = repo.completed().map(|t| t.id).collect();
    assert_eq!(completed, vec![done]);

    let missing = Uuid::new_v4();
    assert_eq!(
        repo.with_tournament(missing, |_| Ok(())),
        Err(TournamentError::TournamentNotFound(missing))
    );
}

#[tokio::test]
async fn file_store_saves_and_loads() {
    let path = temp_path();
    let store = FileStore::new(&path);

    let mut repo = TournamentRepository::new();
    let id = repo.insert(tournament("Stored"));
    repo.insert(tournament("Deleted"));
    repo.delete(repo.all()[0].id).unwrap();

    store.save(&repo.snapshot()).await.unwrap();
    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, repo.snapshot());

    let restored = TournamentRepository::from_snapshot(loaded);
    assert!(restored.get(id).is_some());
    assert_eq!(restored.deleted().len(), 1);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn missing_file_loads_empty() {
    let store = FileStore::new(temp_path());
    assert_eq!(store.load().await.unwrap(), Snapshot::default());
}

#[tokio::test]
async fn invalid_file_is_an_error() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.load().await, Err(StoreError::Json(_))));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn snapshot_fields_default_when_missing() {
    let snapshot: Snapshot = serde_json::from_str(r#"{"tournaments": []}"#).unwrap();
    assert!(snapshot.deleted.is_empty());
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = ServerConfig::from_lookup(|_| None);
    assert_eq!(defaults, ServerConfig::default());
    assert_eq!(defaults.port, 8080);

    let env: HashMap<&str, &str> = [("HOST", "127.0.0.1"), ("PORT", "nope"), ("DATA_FILE", "/tmp/b.json")]
        .into_iter()
        .collect();
    let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.data_file, PathBuf::from("/tmp/b.json"));
}
