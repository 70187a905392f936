//! Control surface client
//!
//! The requesting side of the control channel as used by a control panel:
//! it keeps the level it displays, sends requests to the tab's engine, and
//! recovers from a missing engine by attaching it and retrying once. A
//! missing engine is never surfaced to the end user as an error.

use super::transport::PageTransport;
use crate::error::{Error, Result};
use tracing::{debug, info, warn};
use vboost_common::events::TabId;
use vboost_common::protocol::{ControlRequest, ControlResponse};
use vboost_common::GainLevel;

/// One-click levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Normal,
    Vocal,
    Cinema,
    Bass,
}

impl Preset {
    pub fn level(&self) -> GainLevel {
        match self {
            Preset::Normal => GainLevel::UNITY,
            Preset::Vocal => GainLevel::clamped(120),
            Preset::Cinema => GainLevel::clamped(150),
            Preset::Bass => GainLevel::clamped(200),
        }
    }
}

/// Control surface bound to one tab
pub struct ControlSurface<T: PageTransport> {
    transport: T,
    tab: TabId,
    level: GainLevel,
    /// Level to restore on unmute
    muted_from: Option<GainLevel>,
}

impl<T: PageTransport> ControlSurface<T> {
    pub fn new(transport: T, tab: TabId) -> Self {
        Self {
            transport,
            tab,
            level: GainLevel::default(),
            muted_from: None,
        }
    }

    /// Level currently shown to the user
    pub fn level(&self) -> GainLevel {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted_from.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Pull the engine's current level. Without an engine on the page the
    /// displayed level stays where it is.
    pub async fn sync_level(&mut self) -> GainLevel {
        match self.transport.send(self.tab, ControlRequest::GetVolume).await {
            Ok(ControlResponse::Level { level }) => self.level = level,
            Ok(other) => warn!("Unexpected reply to GET_VOLUME: {:?}", other),
            Err(e) if e.is_retryable() => {
                debug!("Engine not attached to {} yet, showing {}", self.tab, self.level)
            }
            Err(e) => warn!("GET_VOLUME on {} failed: {}", self.tab, e),
        }
        self.level
    }

    /// Apply a level to the tab
    ///
    /// The reply is returned as-is; a `success: false` reply (no audio on
    /// the page) is a normal outcome, not an `Err`.
    pub async fn apply_level(&mut self, level: GainLevel) -> Result<ControlResponse> {
        self.level = level;
        self.request_with_retry(ControlRequest::SetVolume { level }).await
    }

    /// Mute, or restore the level from before muting. Mute state only
    /// changes once the page has taken the new level.
    pub async fn toggle_mute(&mut self) -> Result<ControlResponse> {
        let shown = self.level;
        let target = self.muted_from.unwrap_or(GainLevel::MIN);

        let response = self.apply_level(target).await;
        match &response {
            Ok(_) => {
                self.muted_from = match self.muted_from {
                    Some(_) => None,
                    None => Some(shown),
                }
            }
            Err(_) => self.level = shown,
        }
        response
    }

    pub async fn apply_preset(&mut self, preset: Preset) -> Result<ControlResponse> {
        self.muted_from = None;
        self.apply_level(preset.level()).await
    }

    /// Back to unity gain
    pub async fn reset(&mut self) -> Result<ControlResponse> {
        self.apply_preset(Preset::Normal).await
    }

    async fn request_with_retry(&self, request: ControlRequest) -> Result<ControlResponse> {
        match self.transport.send(self.tab, request).await {
            Err(Error::ChannelUnavailable(_)) => {
                info!("Engine not listening on {}, attaching and retrying", self.tab);
                self.transport.attach(self.tab).await?;
                self.transport.send(self.tab, request).await
            }
            other => other,
        }
    }
}
