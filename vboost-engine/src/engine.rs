//! Gain engine
//!
//! Owns the page's single audio graph and turns a requested level into the
//! gain coefficient applied to every routed element.
//!
//! # Lifecycle
//!
//! - The graph is created by the first `ensure_graph` call and never rebuilt
//!   while the engine lives. Rebuilding would drop existing routing and
//!   re-connect elements that are already connected.
//! - The graph is dropped with the engine, which is owned by the page context
//!   and dropped on page teardown.

use crate::audio::AudioGraph;
use crate::error::{Error, Result};
use crate::page::MediaElement;
use tracing::{debug, info};
use vboost_common::config::AudioConfig;
use vboost_common::GainLevel;

/// Per-page gain engine
#[derive(Debug)]
pub struct GainEngine {
    graph: Option<AudioGraph>,
    current_level: Option<GainLevel>,
    sample_rate: u32,
    smoothing_time_constant: f64,
}

impl GainEngine {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            graph: None,
            current_level: None,
            sample_rate: config.sample_rate,
            smoothing_time_constant: config.smoothing_time_constant_s,
        }
    }

    /// Create the graph if this page has none yet, then route `element`.
    ///
    /// Returns `true` if `element` was connected by this call, whether or not
    /// the graph already existed.
    pub fn ensure_graph(&mut self, element: &MediaElement) -> bool {
        let sample_rate = self.sample_rate;
        let graph = self.graph.get_or_insert_with(|| {
            info!(sample_rate, "Created audio graph for page");
            AudioGraph::new(sample_rate)
        });
        graph.connect_element(element)
    }

    /// Route an element through the gain node.
    ///
    /// Returns `Ok(false)` if the element was already routed.
    pub fn route(&mut self, element: &MediaElement) -> Result<bool> {
        let graph = self.graph.as_mut().ok_or(Error::NoAudioSource)?;
        Ok(graph.connect_element(element))
    }

    /// Apply a level with smoothing and remember it as the current level
    pub fn set_level(&mut self, level: GainLevel) -> Result<GainLevel> {
        let graph = self.graph.as_mut().ok_or(Error::NoAudioSource)?;
        graph.set_gain_target(level.coefficient(), self.smoothing_time_constant);

        let previous = self.current_level.replace(level);
        debug!(
            "Gain level {} -> {} (coefficient {:.2})",
            previous.unwrap_or_default(),
            level,
            level.coefficient()
        );
        Ok(level)
    }

    /// Last applied level, or unity if nothing was applied on this page
    pub fn current_level(&self) -> GainLevel {
        self.current_level.unwrap_or_default()
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }

    pub fn graph(&self) -> Option<&AudioGraph> {
        self.graph.as_ref()
    }

    pub fn routed_count(&self) -> usize {
        self.graph.as_ref().map_or(0, AudioGraph::routed_count)
    }

    /// Element connections made into the graph over its life
    pub fn connection_count(&self) -> usize {
        self.graph.as_ref().map_or(0, |g| g.connections().len())
    }

    /// Coefficient currently being applied, if a graph exists
    pub fn live_coefficient(&self) -> Option<f32> {
        self.graph.as_ref().map(AudioGraph::live_coefficient)
    }

    /// Render a block through the graph. Without a graph nothing is routed and
    /// the page plays at native volume, so the block is left untouched.
    pub fn process(&mut self, samples: &mut [f32], channels: usize) -> Result<()> {
        match self.graph.as_mut() {
            Some(graph) => graph.process(samples, channels),
            None => Ok(()),
        }
    }
}
