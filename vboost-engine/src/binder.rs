//! Media binder
//!
//! Finds the playable elements of a page and hands them to the gain engine.
//! Discovery is a full rescan of the content tree on every request rather
//! than an incrementally maintained index; it only runs on user interaction.

use crate::engine::GainEngine;
use crate::error::{Error, Result};
use crate::page::Document;
use tracing::debug;

/// Discover every media element in `document` and route each one.
///
/// With no elements on the page this fails with `Error::NoAudioSource` and
/// leaves the engine untouched, so no graph exists afterwards unless one was
/// already built. Returns the number of elements newly routed by this call.
pub fn discover_and_route(document: &dyn Document, engine: &mut GainEngine) -> Result<usize> {
    let elements = document.media_elements();
    let Some(first) = elements.first() else {
        debug!(location = %document.location(), "No media elements on page");
        return Err(Error::NoAudioSource);
    };

    let mut newly_routed = usize::from(engine.ensure_graph(first));
    for element in &elements[1..] {
        if engine.route(element)? {
            newly_routed += 1;
        }
    }

    debug!(
        discovered = elements.len(),
        newly_routed,
        routed_total = engine.routed_count(),
        "Media discovery complete"
    );
    Ok(newly_routed)
}
