//! Test helpers for vboost-engine integration tests
//!
//! - `TestHost`: tab host over a file-backed domain store in a temp dir
//! - `web_page`: document with a given number of media elements

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use vboost_common::config::AudioConfig;
use vboost_common::db::init_database;
use vboost_engine::{DomainStore, MediaKind, StaticDocument, TabHost};

/// Tab host plus the store and directory backing it
pub struct TestHost {
    pub host: Arc<TabHost>,
    pub store: DomainStore,
    _dir: TempDir,
}

impl TestHost {
    pub async fn new() -> Self {
        let (store, dir) = temp_store().await;
        let host = Arc::new(TabHost::new(store.clone(), AudioConfig::default()));
        Self {
            host,
            store,
            _dir: dir,
        }
    }
}

/// Domain store on a fresh database file
pub async fn temp_store() -> (DomainStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = init_database(&dir.path().join("levels.db"))
        .await
        .expect("Failed to init database");
    (DomainStore::new(pool), dir)
}

/// Page at `address` with `media_count` video elements
pub fn web_page(address: &str, media_count: usize) -> Arc<StaticDocument> {
    let doc = Arc::new(StaticDocument::new(address));
    for i in 0..media_count {
        doc.add_element(MediaKind::Video, Some(&format!("clip-{}.mp4", i)));
    }
    doc
}
