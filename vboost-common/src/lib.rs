//! # Volume Boost Common Library
//!
//! Shared code for every Volume Boost context including:
//! - Gain level type and clamping rules
//! - Control protocol messages (GET_VOLUME / SET_VOLUME)
//! - Extension event types and the event bus
//! - Configuration loading and logging setup
//! - Database initialization

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod level;
pub mod logging;
pub mod protocol;

pub use error::{Error, Result};
pub use level::GainLevel;
