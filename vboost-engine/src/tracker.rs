//! Tab audibility tracker
//!
//! Records which tabs are currently producing sound. Updates are
//! last-write-wins per tab and can never fail; missing or out-of-order
//! notifications just leave the last value in place.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use vboost_common::events::TabId;

/// Last known audio state of a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabAudibility {
    pub audible: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Transient tab -> audible map, rebuilt from notifications after a restart
#[derive(Debug, Default)]
pub struct TabAudioTracker {
    tabs: RwLock<HashMap<TabId, TabAudibility>>,
}

impl TabAudioTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the tab's current audio state
    pub fn record(&self, tab: TabId, audible: bool) {
        let mut tabs = self.tabs.write().unwrap_or_else(|e| e.into_inner());
        tabs.insert(
            tab,
            TabAudibility {
                audible,
                updated_at: chrono::Utc::now(),
            },
        );
        debug!("{} audible={}", tab, audible);
    }

    /// Drop a closed tab
    pub fn forget(&self, tab: TabId) -> bool {
        self.tabs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&tab)
            .is_some()
    }

    /// `None` if no notification was seen for the tab
    pub fn is_audible(&self, tab: TabId) -> Option<bool> {
        self.get(tab).map(|state| state.audible)
    }

    pub fn get(&self, tab: TabId) -> Option<TabAudibility> {
        self.tabs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&tab)
            .copied()
    }

    /// Tabs currently producing sound, in id order
    pub fn audible_tabs(&self) -> Vec<TabId> {
        let tabs = self.tabs.read().unwrap_or_else(|e| e.into_inner());
        let mut audible: Vec<TabId> = tabs
            .iter()
            .filter(|(_, state)| state.audible)
            .map(|(tab, _)| *tab)
            .collect();
        audible.sort();
        audible
    }

    pub fn tracked_count(&self) -> usize {
        self.tabs.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tab() {
        let tracker = TabAudioTracker::new();
        assert_eq!(tracker.is_audible(TabId(1)), None);
        assert!(!tracker.forget(TabId(1)));
    }

    #[test]
    fn test_last_write_wins() {
        let tracker = TabAudioTracker::new();

        tracker.record(TabId(1), true);
        tracker.record(TabId(1), false);
        tracker.record(TabId(1), false);
        assert_eq!(tracker.is_audible(TabId(1)), Some(false));

        tracker.record(TabId(1), true);
        assert_eq!(tracker.is_audible(TabId(1)), Some(true));
        assert_eq!(tracker.tracked_count(), 1);
    }

    #[test]
    fn test_audible_tabs_sorted() {
        let tracker = TabAudioTracker::new();
        tracker.record(TabId(9), true);
        tracker.record(TabId(2), true);
        tracker.record(TabId(5), false);

        assert_eq!(tracker.audible_tabs(), vec![TabId(2), TabId(9)]);

        assert!(tracker.forget(TabId(9)));
        assert_eq!(tracker.audible_tabs(), vec![TabId(2)]);
    }
}
