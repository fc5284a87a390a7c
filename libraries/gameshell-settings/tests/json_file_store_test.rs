//! JSON file store tests

use gameshell_core::{KeyValueStore, ShellError};
use gameshell_settings::{JsonFileStore, PlayerProgress, SettingsController};
use std::sync::Arc;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("settings.json"))
}

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.get_bool("muted").await.unwrap(), None);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn values_persist_across_instances() {
    let dir = TempDir::new().unwrap();

    let store = store_in(&dir);
    store.set_bool("muted", true).await.unwrap();
    store.set_string("player_name", "Ada").await.unwrap();
    store.set_int("highest_level_reached", 9).await.unwrap();

    let reopened = store_in(&dir);
    assert_eq!(reopened.get_bool("muted").await.unwrap(), Some(true));
    assert_eq!(
        reopened.get_string("player_name").await.unwrap(),
        Some("Ada".to_string())
    );
    assert_eq!(reopened.get_int("highest_level_reached").await.unwrap(), Some(9));
}

#[tokio::test]
async fn file_holds_one_json_object() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.set_bool("sounds_on", false).await.unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(value, serde_json::json!({ "sounds_on": false }));
    assert!(!dir.path().join("settings.json.tmp").exists());
}

#[tokio::test]
async fn creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/deeper/settings.json"));

    store.set_int("level", 1).await.unwrap();

    assert!(store.path().exists());
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);

    assert!(matches!(
        store.get_bool("muted").await,
        Err(ShellError::Serialization(_))
    ));
}

#[tokio::test]
async fn non_object_document_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = JsonFileStore::new(&path);

    assert!(matches!(
        store.get_int("level").await,
        Err(ShellError::Storage(_))
    ));
}

#[tokio::test]
async fn type_mismatch_is_an_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.set_string("muted", "sometimes").await.unwrap();

    assert!(store.get_bool("muted").await.is_err());
}

#[tokio::test]
async fn settings_and_progress_share_a_file() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_in(&dir));

    let settings = SettingsController::new(store.clone());
    settings.toggle_muted().await;
    let progress = PlayerProgress::new(store);
    progress.set_level_reached(4).await.unwrap();

    let reopened = Arc::new(store_in(&dir));
    let settings = SettingsController::new(reopened.clone());
    let progress = PlayerProgress::new(reopened);

    assert!(settings.load_state_from_persistence().await);
    assert!(settings.audio().muted.get());
    assert_eq!(progress.load().await.unwrap(), 4);
}
