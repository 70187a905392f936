//! Engine startup
//!
//! Wires the shared pieces together in dependency order: database, event
//! bus, domain store, tab host, and the background service consuming the bus.

use crate::background::BackgroundService;
use crate::channel::TabHost;
use crate::db::DomainStore;
use crate::error::Result;
use crate::tracker::TabAudioTracker;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;
use vboost_common::config::VboostConfig;
use vboost_common::db::init_database;
use vboost_common::events::{EventBus, ExtensionEvent};

/// Running engine: everything a host needs to open tabs and route events
pub struct Runtime {
    pub host: Arc<TabHost>,
    pub store: DomainStore,
    pub events: EventBus,
    pub tracker: Arc<TabAudioTracker>,
    background: JoinHandle<()>,
}

impl Runtime {
    /// Open the database and start the background service.
    ///
    /// `db_path` overrides every configured database location.
    pub async fn start(config: &VboostConfig, db_path: Option<&Path>) -> Result<Self> {
        let db_path = config.resolve_db_path(db_path);
        let pool = init_database(&db_path).await?;

        let events = EventBus::from_config(&config.events);
        let store = DomainStore::new(pool).with_events(events.clone());
        let host = Arc::new(TabHost::new(store.clone(), config.audio.clone()));

        let tracker = Arc::new(TabAudioTracker::new());
        let background = BackgroundService::new(tracker.clone()).spawn(&events);
        events.emit_lossy(ExtensionEvent::installed());

        info!(
            db = %db_path.display(),
            bus_capacity = events.capacity(),
            "Volume Boost engine started"
        );

        Ok(Self {
            host,
            store,
            events,
            tracker,
            background,
        })
    }

    /// Stop the background service and close the database
    pub async fn shutdown(self) {
        self.background.abort();
        let _ = self.background.await;
        self.store.pool().close().await;
        info!("Volume Boost engine stopped");
    }
}
