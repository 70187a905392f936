//! Audio processing graph
//!
//! One processing context, one gain node, and the set of media elements
//! routed through it. Level control happens on the gain node only.

mod context;
mod graph;
mod param;

pub use context::AudioContext;
pub use graph::{AudioGraph, Connection};
pub use param::GainParam;
