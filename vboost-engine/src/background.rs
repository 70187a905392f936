//! Background service
//!
//! Long-lived extension-level worker. Consumes events from the bus, keeps the
//! tab audibility tracker current, and acknowledges lifecycle notifications.
//! Nothing here can fail the rest of the system: a lagging receiver skips
//! ahead, and the loop only ends when the bus is gone.

use crate::tracker::TabAudioTracker;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vboost_common::events::{EventBus, ExtensionEvent};

pub struct BackgroundService {
    tracker: Arc<TabAudioTracker>,
}

impl BackgroundService {
    pub fn new(tracker: Arc<TabAudioTracker>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<TabAudioTracker> {
        &self.tracker
    }

    /// Apply a single event
    pub fn handle_event(&self, event: &ExtensionEvent) {
        match event {
            ExtensionEvent::Installed { .. } => info!("Volume Boost installed"),
            ExtensionEvent::TabUpdated {
                tab_id,
                audible: Some(audible),
                ..
            } => self.tracker.record(*tab_id, *audible),
            // Update without an audio change
            ExtensionEvent::TabUpdated { .. } => {}
            ExtensionEvent::TabRemoved { tab_id, .. } => {
                self.tracker.forget(*tab_id);
            }
            ExtensionEvent::LevelSaved { domain, level, .. } => {
                debug!("Stored level for {} is now {}", domain, level)
            }
        }
    }

    /// Consume events until the bus closes
    pub async fn run(self, mut rx: broadcast::Receiver<ExtensionEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.handle_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Background service lagged, {} events skipped", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!("Event bus closed, background service stopping");
    }

    /// Subscribe to `bus` and run on a new task
    pub fn spawn(self, bus: &EventBus) -> JoinHandle<()> {
        let rx = bus.subscribe();
        tokio::spawn(self.run(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vboost_common::events::TabId;

    #[test]
    fn test_tab_update_without_audible_is_ignored() {
        let service = BackgroundService::new(Arc::new(TabAudioTracker::new()));

        service.handle_event(&ExtensionEvent::TabUpdated {
            tab_id: TabId(4),
            audible: None,
            timestamp: chrono::Utc::now(),
        });
        assert_eq!(service.tracker().is_audible(TabId(4)), None);

        service.handle_event(&ExtensionEvent::tab_audible(TabId(4), true));
        assert_eq!(service.tracker().is_audible(TabId(4)), Some(true));
    }

    #[test]
    fn test_installed_and_removed() {
        let service = BackgroundService::new(Arc::new(TabAudioTracker::new()));

        service.handle_event(&ExtensionEvent::installed());
        assert_eq!(service.tracker().tracked_count(), 0);

        service.handle_event(&ExtensionEvent::tab_audible(TabId(1), true));
        service.handle_event(&ExtensionEvent::tab_removed(TabId(1)));
        assert_eq!(service.tracker().is_audible(TabId(1)), None);

        // Removal of an unknown tab is harmless
        service.handle_event(&ExtensionEvent::tab_removed(TabId(77)));
    }
}
