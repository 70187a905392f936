//! Domain level store
//!
//! Last applied gain level per site hostname, shared by every page context.
//! Each write is a single upsert, so concurrent writers to the same domain
//! resolve as last-write-wins and a half-written value is never observable.

use crate::error::Result;
use crate::page::PageLocation;
use sqlx::{Pool, Sqlite};
use tracing::debug;
use vboost_common::events::{EventBus, ExtensionEvent};
use vboost_common::GainLevel;

/// Result of a location-keyed save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// Page has no domain (non-http(s) origin); nothing stored
    Skipped,
}

/// Durable hostname -> level mapping
#[derive(Debug, Clone)]
pub struct DomainStore {
    db: Pool<Sqlite>,
    events: Option<EventBus>,
}

impl DomainStore {
    /// Store over an initialized pool (see `vboost_common::db::init_database`)
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db, events: None }
    }

    /// Publish a `LevelSaved` event after every write
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.db
    }

    /// Write `level` for `domain`, replacing any previous value
    pub async fn save(&self, domain: &str, level: GainLevel) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO domain_levels (domain, level, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(domain) DO UPDATE SET
                level = excluded.level,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(domain)
        .bind(level.percent() as i64)
        .execute(&self.db)
        .await?;

        debug!("Saved level {} for {}", level, domain);

        if let Some(events) = &self.events {
            events.emit_lossy(ExtensionEvent::level_saved(domain, level));
        }
        Ok(())
    }

    /// Save under the page's domain; pages without one are skipped silently
    pub async fn save_for(&self, location: &PageLocation, level: GainLevel) -> Result<SaveOutcome> {
        match location.domain() {
            Some(domain) => {
                self.save(domain, level).await?;
                Ok(SaveOutcome::Written)
            }
            None => {
                debug!("No domain for {}, level not persisted", location);
                Ok(SaveOutcome::Skipped)
            }
        }
    }

    /// Stored level for `domain`; `None` if nothing was recorded
    pub async fn load(&self, domain: &str) -> Result<Option<GainLevel>> {
        let level: Option<i64> =
            sqlx::query_scalar("SELECT level FROM domain_levels WHERE domain = ?")
                .bind(domain)
                .fetch_optional(&self.db)
                .await?;

        Ok(level.map(GainLevel::clamped))
    }

    /// Stored level for the page's domain
    pub async fn load_for(&self, location: &PageLocation) -> Result<Option<GainLevel>> {
        match location.domain() {
            Some(domain) => self.load(domain).await,
            None => Ok(None),
        }
    }
}
