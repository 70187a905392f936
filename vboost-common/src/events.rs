//! Extension event types and event bus
//!
//! Browser and storage notifications consumed by the background service.
//! Events are fanned out over a `tokio::sync::broadcast` channel; a slow
//! subscriber loses the oldest events rather than blocking the publisher.

use crate::config::EventsConfig;
use crate::level::GainLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

/// Browser tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

impl From<u32> for TabId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Extension-level events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtensionEvent {
    /// One-time install notification
    Installed {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Tab state changed. `audible` is present only when the tab's
    /// audio activity is part of the change.
    TabUpdated {
        tab_id: TabId,
        audible: Option<bool>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Tab closed
    TabRemoved {
        tab_id: TabId,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Domain store wrote a level
    LevelSaved {
        domain: String,
        level: GainLevel,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl ExtensionEvent {
    pub fn installed() -> Self {
        Self::Installed {
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn tab_audible(tab_id: TabId, audible: bool) -> Self {
        Self::TabUpdated {
            tab_id,
            audible: Some(audible),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn tab_removed(tab_id: TabId) -> Self {
        Self::TabRemoved {
            tab_id,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn level_saved(domain: impl Into<String>, level: GainLevel) -> Self {
        Self::LevelSaved {
            domain: domain.into(),
            level,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Event type name, for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Installed { .. } => "Installed",
            Self::TabUpdated { .. } => "TabUpdated",
            Self::TabRemoved { .. } => "TabRemoved",
            Self::LevelSaved { .. } => "LevelSaved",
        }
    }
}

/// Broadcast bus for extension events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ExtensionEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use vboost_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(64);
    /// assert_eq!(event_bus.capacity(), 64);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, capacity }
    }

    /// Bus sized from the `[events]` config section
    pub fn from_config(config: &EventsConfig) -> Self {
        Self::new(config.bus_capacity)
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ExtensionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ExtensionEvent,
    ) -> Result<usize, broadcast::error::SendError<ExtensionEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ExtensionEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
