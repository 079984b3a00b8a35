use std::path::PathBuf;

use moodplay::storage::{FileStore, MemoryStore, StateStore};

fn temp_store(name: &str) -> FileStore {
    let dir: PathBuf = std::env::temp_dir()
        .join("moodplay-tests")
        .join(format!("{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    FileStore::new(dir.join("state.json"))
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let store = temp_store("round-trip");

    assert_eq!(store.get("missing").await.unwrap(), None);

    store.set("spotify_access_token", "abc").await.unwrap();
    store.set("spotify_user", "{\"id\":\"u\"}").await.unwrap();
    assert!(store.path().exists());

    // a fresh handle on the same path sees the same entries
    let reopened = FileStore::new(store.path());
    assert_eq!(
        reopened.get("spotify_access_token").await.unwrap().as_deref(),
        Some("abc")
    );
    assert_eq!(
        reopened.get("spotify_user").await.unwrap().as_deref(),
        Some("{\"id\":\"u\"}")
    );
}

#[tokio::test]
async fn test_file_store_remove_deletes_empty_file() {
    let store = temp_store("remove");
    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();

    store.remove("a").await.unwrap();
    assert!(store.path().exists());
    assert_eq!(store.get("a").await.unwrap(), None);

    store.remove("b").await.unwrap();
    assert!(!store.path().exists());

    // removing from a missing file is fine
    store.remove("b").await.unwrap();
}

#[tokio::test]
async fn test_file_store_corrupt_file() {
    let store = temp_store("corrupt");
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ definitely not json").unwrap();

    assert!(store.get("spotify_access_token").await.is_err());

    store.set("spotify_access_token", "fresh").await.unwrap();
    assert_eq!(
        store.get("spotify_access_token").await.unwrap().as_deref(),
        Some("fresh")
    );
}

#[tokio::test]
async fn test_memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let clone = store.clone();

    store.set("key", "value").await.unwrap();
    assert_eq!(clone.get("key").await.unwrap().as_deref(), Some("value"));
    assert_eq!(clone.len(), 1);

    clone.remove("key").await.unwrap();
    assert!(store.is_empty());
    assert_eq!(store.get("key").await.unwrap(), None);
}
