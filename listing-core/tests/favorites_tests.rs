use std::path::PathBuf;

use listing_core::{read_slot, slot_path, FavoriteStore, StorageError, FAVORITES_KEY};

fn temp_dir(tag: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "listing_fav_{}_{}",
        tag,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

#[tokio::test]
async fn missing_slot_hydrates_empty() {
    let dir = temp_dir("missing");
    let store = FavoriteStore::load_from(slot_path(&dir)).await;
    assert!(store.is_empty());
    assert!(!store.is_volatile());
}

#[tokio::test]
async fn toggle_persists_and_reloads() {
    let dir = temp_dir("persist");
    let path = slot_path(&dir);
    assert!(path.ends_with(format!("{FAVORITES_KEY}.json")));

    let mut store = FavoriteStore::load_from(&path).await;
    assert!(store.toggle("7").await);
    assert!(store.toggle("Loft__12").await);
    assert!(store.contains("7"));

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["7", "Loft__12"]);

    let reopened = FavoriteStore::load_from(&path).await;
    assert!(reopened.contains("7"));
    assert!(reopened.contains("Loft__12"));
    assert_eq!(reopened.len(), 2);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn double_toggle_restores_membership_and_persisted_value() {
    let dir = temp_dir("double");
    let path = slot_path(&dir);
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(&path, r#"["b","a"]"#).await.unwrap();

    let mut store = FavoriteStore::load_from(&path).await;
    let before = store.favorites().clone();
    store.toggle("a").await;
    let after_first = tokio::fs::read_to_string(&path).await.unwrap();
    store.toggle("a").await;
    let after_second = tokio::fs::read_to_string(&path).await.unwrap();

    assert_eq!(store.favorites(), &before);
    assert_eq!(after_first, r#"["b"]"#);
    assert_eq!(after_second, r#"["a","b"]"#);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn entries_are_coerced_to_strings() {
    let dir = temp_dir("coerce");
    let path = slot_path(&dir);
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(&path, r#"[7, "x", true, null]"#).await.unwrap();

    let store = FavoriteStore::load_from(&path).await;
    assert!(store.contains("7"));
    assert!(store.contains("x"));
    assert!(store.contains("true"));
    assert_eq!(store.len(), 3);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn malformed_slot_is_reported_but_never_raised() {
    let dir = temp_dir("corrupt");
    let path = slot_path(&dir);
    tokio::fs::create_dir_all(&dir).await.unwrap();

    tokio::fs::write(&path, b"{ this is not json ").await.unwrap();
    assert!(matches!(read_slot(&path).await, Err(StorageError::Corrupted(_))));
    assert!(FavoriteStore::load_from(&path).await.is_empty());

    tokio::fs::write(&path, br#"{"ids": ["1"]}"#).await.unwrap();
    assert!(matches!(read_slot(&path).await, Err(StorageError::NotAnArray)));
    assert!(FavoriteStore::load_from(&path).await.is_empty());

    tokio::fs::write(&path, b"   ").await.unwrap();
    assert!(read_slot(&path).await.unwrap().is_empty());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn unwritable_slot_degrades_to_memory() {
    let dir = temp_dir("readonly");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    // A directory sitting where the slot file should be makes every write fail.
    let path = slot_path(&dir);
    tokio::fs::create_dir_all(&path).await.unwrap();

    let mut store = FavoriteStore::load_from(&path).await;
    assert!(store.toggle("9").await);
    assert!(store.contains("9"));
    assert!(store.is_volatile());
    assert!(store.persist().await.is_err());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn in_memory_store_never_touches_disk() {
    let mut store = FavoriteStore::in_memory();
    assert!(store.toggle("1").await);
    assert!(!store.toggle("1").await);
    assert!(store.is_empty());
    assert!(store.is_volatile());
    assert!(store.persist().await.is_ok());
}
