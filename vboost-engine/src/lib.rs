//! # Volume Boost Engine (vboost-engine)
//!
//! Per-page gain engine for boosting media playback up to 800%.
//!
//! **Purpose:** Route a page's media elements through a single gain node,
//! apply the user's level with smoothing, remember the level per site, and
//! serve GET/SET requests from a control surface.
//!
//! **Architecture:** One `PageContext` per loaded page, each on its own task;
//! a shared SQLite-backed `DomainStore`; a `BackgroundService` consuming
//! extension events.

pub mod audio;
pub mod background;
pub mod binder;
pub mod channel;
pub mod db;
pub mod engine;
pub mod error;
pub mod page;
pub mod runtime;
pub mod tracker;

pub use channel::{ControlSurface, PageContext, PageTransport, Preset, TabHost};
pub use db::DomainStore;
pub use engine::GainEngine;
pub use error::{Error, Result};
pub use page::{Document, MediaElement, MediaKind, PageLocation, StaticDocument};
pub use runtime::Runtime;
pub use tracker::TabAudioTracker;
