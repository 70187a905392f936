//! Background service integration tests
//!
//! Service running on its own task, fed through the event bus.

use std::sync::Arc;
use vboost_common::events::{EventBus, ExtensionEvent, TabId};
use vboost_engine::background::BackgroundService;
use vboost_engine::TabAudioTracker;

#[tokio::test]
async fn test_service_tracks_audible_tabs() {
    let bus = EventBus::new(32);
    let tracker = Arc::new(TabAudioTracker::new());
    let handle = BackgroundService::new(tracker.clone()).spawn(&bus);

    bus.emit(ExtensionEvent::installed()).unwrap();
    bus.emit(ExtensionEvent::tab_audible(TabId(1), true)).unwrap();
    bus.emit(ExtensionEvent::tab_audible(TabId(2), true)).unwrap();
    bus.emit(ExtensionEvent::tab_audible(TabId(1), false)).unwrap();
    bus.emit(ExtensionEvent::tab_removed(TabId(2))).unwrap();
    bus.emit(ExtensionEvent::tab_audible(TabId(3), true)).unwrap();

    // Service stops once the last sender is gone, after draining the queue
    drop(bus);
    handle.await.unwrap();

    assert_eq!(tracker.is_audible(TabId(1)), Some(false));
    assert_eq!(tracker.is_audible(TabId(2)), None);
    assert_eq!(tracker.audible_tabs(), vec![TabId(3)]);
}

#[tokio::test]
async fn test_lagging_service_keeps_running() {
    let bus = EventBus::new(2);
    let tracker = Arc::new(TabAudioTracker::new());
    let handle = BackgroundService::new(tracker.clone()).spawn(&bus);

    // Single-threaded runtime: the service task cannot run until we yield,
    // so all but the newest two events overflow the channel
    for tab in 0..10 {
        bus.emit(ExtensionEvent::tab_audible(TabId(tab), true)).unwrap();
    }

    drop(bus);
    handle.await.unwrap();

    assert_eq!(tracker.tracked_count(), 2);
    assert_eq!(tracker.audible_tabs(), vec![TabId(8), TabId(9)]);
}

#[tokio::test]
async fn test_level_saved_does_not_touch_tracker() {
    let bus = EventBus::new(8);
    let tracker = Arc::new(TabAudioTracker::new());
    let handle = BackgroundService::new(tracker.clone()).spawn(&bus);

    bus.emit(ExtensionEvent::level_saved(
        "example.com",
        vboost_common::GainLevel::MAX,
    ))
    .unwrap();

    drop(bus);
    handle.await.unwrap();

    assert_eq!(tracker.tracked_count(), 0);
}
