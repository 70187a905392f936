//! Domain store integration tests
//!
//! Durability across database reopen, concurrent writers, and the
//! `LevelSaved` notification.

mod helpers;

use helpers::temp_store;
use tempfile::TempDir;
use vboost_common::db::init_database;
use vboost_common::events::{EventBus, ExtensionEvent};
use vboost_common::GainLevel;
use vboost_engine::db::SaveOutcome;
use vboost_engine::{DomainStore, PageLocation};

#[tokio::test]
async fn test_levels_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("levels.db");

    {
        let store = DomainStore::new(init_database(&db_path).await.unwrap());
        store.save("example.com", GainLevel::clamped(420)).await.unwrap();
        store.save("music.example", GainLevel::MIN).await.unwrap();
        store.pool().close().await;
    }

    let store = DomainStore::new(init_database(&db_path).await.unwrap());
    assert_eq!(
        store.load("example.com").await.unwrap(),
        Some(GainLevel::clamped(420))
    );
    assert_eq!(store.load("music.example").await.unwrap(), Some(GainLevel::MIN));
}

#[tokio::test]
async fn test_concurrent_writers_leave_one_value() {
    let (store, _dir) = temp_store().await;

    let mut handles = Vec::new();
    for i in 1..=20i64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.save("busy.example", GainLevel::clamped(i * 10)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = store.load("busy.example").await.unwrap().unwrap();
    assert!((10..=200).contains(&stored.percent()));
    assert_eq!(stored.percent() % 10, 0);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domain_levels")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_location_keyed_save() {
    let (store, _dir) = temp_store().await;

    let page = PageLocation::parse("https://video.example:8443/watch?v=1");
    let outcome = store.save_for(&page, GainLevel::clamped(300)).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Written);
    assert_eq!(
        store.load("video.example").await.unwrap(),
        Some(GainLevel::clamped(300))
    );
    assert_eq!(
        store.load_for(&page).await.unwrap(),
        Some(GainLevel::clamped(300))
    );

    let local = PageLocation::parse("about:blank");
    let outcome = store.save_for(&local, GainLevel::MAX).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Skipped);
    assert_eq!(store.load_for(&local).await.unwrap(), None);
}

#[tokio::test]
async fn test_save_publishes_level_saved() {
    let (store, _dir) = temp_store().await;
    let bus = EventBus::new(8);
    let mut rx = bus.subscribe();
    let store = store.with_events(bus);

    store.save("example.com", GainLevel::clamped(180)).await.unwrap();

    match rx.recv().await.unwrap() {
        ExtensionEvent::LevelSaved { domain, level, .. } => {
            assert_eq!(domain, "example.com");
            assert_eq!(level, GainLevel::clamped(180));
        }
        other => panic!("Unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_out_of_range_rows_are_clamped_on_load() {
    let (store, _dir) = temp_store().await;

    sqlx::query("INSERT INTO domain_levels (domain, level) VALUES (?, ?)")
        .bind("legacy.example")
        .bind(5000i64)
        .execute(store.pool())
        .await
        .unwrap();

    assert_eq!(store.load("legacy.example").await.unwrap(), Some(GainLevel::MAX));
}
