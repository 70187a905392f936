//! Page-side end of the control channel
//!
//! A `PageContext` is everything the engine owns for one loaded page: the
//! document, the gain engine, and a handle to the shared domain store. It
//! serves one request at a time and produces exactly one reply for each.

use crate::binder;
use crate::db::{DomainStore, SaveOutcome};
use crate::engine::GainEngine;
use crate::error::{Error, Result};
use crate::page::Document;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use vboost_common::config::AudioConfig;
use vboost_common::protocol::{ControlRequest, ControlResponse};
use vboost_common::GainLevel;

/// A request paired with the slot its reply goes into
#[derive(Debug)]
pub struct PageEnvelope {
    pub request: ControlRequest,
    pub reply: oneshot::Sender<ControlResponse>,
}

/// Engine state of one loaded page
pub struct PageContext {
    document: Arc<dyn Document>,
    engine: GainEngine,
    store: DomainStore,
    saved_level: Option<GainLevel>,
}

impl PageContext {
    /// Attach the engine to a page.
    ///
    /// Looks up the saved level for the page's domain but does not apply it:
    /// audio processing cannot start without a user gesture, so restoration
    /// waits for the first `SET_VOLUME`.
    pub async fn attach(document: Arc<dyn Document>, store: DomainStore, audio: &AudioConfig) -> Self {
        let saved_level = match store.load_for(document.location()).await {
            Ok(level) => level,
            Err(e) => {
                warn!("Failed to load saved level for {}: {}", document.location(), e);
                None
            }
        };

        if let (Some(domain), Some(level)) = (document.location().domain(), saved_level) {
            info!("Saved level for {} is {}", domain, level);
        }

        Self {
            document,
            engine: GainEngine::new(audio),
            store,
            saved_level,
        }
    }

    /// Serve one request
    pub async fn handle(&mut self, request: ControlRequest) -> ControlResponse {
        match request {
            ControlRequest::GetVolume => ControlResponse::level(self.engine.current_level()),
            ControlRequest::SetVolume { level } => self.set_volume(level).await,
        }
    }

    /// Serve one request in wire form. Undecodable messages are rejected
    /// without a reply.
    pub async fn handle_json(&mut self, raw: &str) -> Result<String> {
        let request = ControlRequest::from_json(raw)?;
        let response = self.handle(request).await;
        Ok(response.to_json()?)
    }

    async fn set_volume(&mut self, level: GainLevel) -> ControlResponse {
        let applied = match binder::discover_and_route(self.document.as_ref(), &mut self.engine)
            .and_then(|_| self.engine.set_level(level))
        {
            Ok(applied) => applied,
            Err(Error::NoAudioSource) => {
                debug!("SET_VOLUME {} on {}: no audio source", level, self.document.location());
                return ControlResponse::failed(Error::NoAudioSource.to_string());
            }
            Err(e) => {
                warn!("SET_VOLUME {} failed: {}", level, e);
                return ControlResponse::failed(e.to_string());
            }
        };

        // Gain is already applied; a failed write only loses the memory of it
        match self.store.save_for(self.document.location(), applied).await {
            Ok(SaveOutcome::Written) => self.saved_level = Some(applied),
            Ok(SaveOutcome::Skipped) => {}
            Err(e) => warn!("Failed to persist level for {}: {}", self.document.location(), e),
        }

        ControlResponse::ok()
    }

    /// Serve requests until every sender is dropped
    pub async fn run(mut self, mut rx: mpsc::Receiver<PageEnvelope>) {
        while let Some(envelope) = rx.recv().await {
            let response = self.handle(envelope.request).await;
            if envelope.reply.send(response).is_err() {
                debug!("Requester went away before the reply was delivered");
            }
        }
        debug!("Page context for {} closed", self.document.location());
    }

    pub fn engine(&self) -> &GainEngine {
        &self.engine
    }

    /// Level recorded for this page's domain, as last known
    pub fn saved_level(&self) -> Option<GainLevel> {
        self.saved_level
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }
}
