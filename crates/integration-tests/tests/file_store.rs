//! File-backed databases across reopen.

#![allow(clippy::unwrap_used)]

use catalog_admin::{CatalogConfig, Store};
use catalog_core::{Category, CategoryId};

fn config_for(dir: &tempfile::TempDir) -> CatalogConfig {
    let path = dir.path().join("catalog.db");
    CatalogConfig {
        database_url: format!("sqlite://{}", path.display()),
        ..CatalogConfig::default()
    }
}

#[tokio::test]
async fn test_reopen_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    let store = Store::open(&config).await.unwrap();
    let id = store
        .add(&Category::new("Drinks", "Beverages"))
        .await
        .unwrap();
    store.close().await;

    let store = Store::open(&config).await.unwrap();
    let category = store.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(category.name, "Drinks");

    let next = store.add(&Category::new("Snacks", "")).await.unwrap();
    assert_eq!(next, CategoryId::new(2));
    store.close().await;
}

#[tokio::test]
async fn test_reopen_applies_no_new_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    let store = Store::open(&config).await.unwrap();
    let first = store.schema_version().await.unwrap();
    store.close().await;

    let store = Store::open(&config).await.unwrap();
    let second = store.schema_version().await.unwrap();
    store.close().await;

    assert_eq!(first, Some(Store::latest_version()));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_database_file_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    assert!(!dir.path().join("catalog.db").exists());

    Store::open(&config).await.unwrap().close().await;

    assert!(dir.path().join("catalog.db").exists());
}
