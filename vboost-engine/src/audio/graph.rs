//! Per-page audio graph
//!
//! ```text
//! element ─┐
//! element ─┼─> gain ─> destination
//! element ─┘
//! ```
//!
//! An element is connected at most once. Connecting the same element twice
//! would double its signal path, and there is no way to undo that short of
//! tearing the whole page down, so membership is checked by element identity
//! before every connection.

use super::context::AudioContext;
use super::param::GainParam;
use crate::error::{Error, Result};
use crate::page::{ElementId, MediaElement};
use std::collections::HashSet;
use tracing::debug;

/// Element -> gain connection record
#[derive(Debug, Clone)]
pub struct Connection {
    pub element: ElementId,
    /// Context time the connection was made
    pub connected_at: f64,
}

/// Processing context, gain node, and routed elements of one page
#[derive(Debug)]
pub struct AudioGraph {
    context: AudioContext,
    gain: GainParam,
    routed: HashSet<ElementId>,
    connections: Vec<Connection>,
    /// gain -> destination
    output_connected: bool,
}

impl AudioGraph {
    /// Build the context and gain node, and connect gain to the output
    pub fn new(sample_rate: u32) -> Self {
        Self {
            context: AudioContext::new(sample_rate),
            gain: GainParam::new(1.0),
            routed: HashSet::new(),
            connections: Vec::new(),
            output_connected: true,
        }
    }

    pub fn context(&self) -> &AudioContext {
        &self.context
    }

    /// Connect an element into the gain node.
    ///
    /// Returns `false` without touching the graph when the element is
    /// already routed.
    pub fn connect_element(&mut self, element: &MediaElement) -> bool {
        if !self.routed.insert(element.id()) {
            return false;
        }
        self.connections.push(Connection {
            element: element.id(),
            connected_at: self.context.current_time(),
        });
        debug!(element = %element.id(), kind = ?element.kind, "Routed media element into gain node");
        true
    }

    pub fn is_routed(&self, id: ElementId) -> bool {
        self.routed.contains(&id)
    }

    pub fn routed_count(&self) -> usize {
        self.routed.len()
    }

    /// Element connections made over the life of the graph
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn output_connected(&self) -> bool {
        self.output_connected
    }

    /// Retarget the gain coefficient from its live value
    pub fn set_gain_target(&mut self, coefficient: f32, time_constant: f64) {
        let now = self.context.current_time();
        self.gain.set_target_at_time(coefficient, now, time_constant);
    }

    /// Gain coefficient at the current context time
    pub fn live_coefficient(&self) -> f32 {
        self.gain.value_at(self.context.current_time())
    }

    /// Coefficient the gain is converging to
    pub fn target_coefficient(&self) -> f32 {
        self.gain.target()
    }

    /// Apply the gain to a block of interleaved samples in-place and advance
    /// the context clock by the block's frame count
    pub fn process(&mut self, samples: &mut [f32], channels: usize) -> Result<()> {
        if channels == 0 {
            return Err(Error::InvalidState("channel count must be positive".to_string()));
        }
        if samples.len() % channels != 0 {
            return Err(Error::InvalidState(format!(
                "sample count {} is not a multiple of {} channels",
                samples.len(),
                channels
            )));
        }

        let frames = samples.len() / channels;
        for (frame_idx, frame) in samples.chunks_exact_mut(channels).enumerate() {
            let coefficient = self.gain.value_at(self.context.frame_time(frame_idx));
            for sample in frame {
                *sample *= coefficient;
            }
        }

        self.context.advance(frames);
        Ok(())
    }
}
