//! Tab transport
//!
//! Delivers control requests to the engine running inside a tab's page.
//! The engine may not be attached to a page yet (freshly loaded, or reloaded
//! since the last attach); delivery then fails with
//! `Error::ChannelUnavailable`, which callers recover from by attaching and
//! retrying.

use super::page_context::{PageContext, PageEnvelope};
use crate::db::DomainStore;
use crate::error::{Error, Result};
use crate::page::Document;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info};
use vboost_common::config::AudioConfig;
use vboost_common::events::TabId;
use vboost_common::protocol::{ControlRequest, ControlResponse};

/// Requests queued per page before senders wait
const PAGE_QUEUE_DEPTH: usize = 16;

/// Request/response delivery to page engines
pub trait PageTransport: Send + Sync {
    /// Deliver one request and wait for its single reply
    fn send(
        &self,
        tab: TabId,
        request: ControlRequest,
    ) -> impl Future<Output = Result<ControlResponse>> + Send;

    /// Attach the engine to the tab's current page. Attaching to a page that
    /// already has an engine is a no-op.
    fn attach(&self, tab: TabId) -> impl Future<Output = Result<()>> + Send;
}

impl<T: PageTransport> PageTransport for Arc<T> {
    fn send(
        &self,
        tab: TabId,
        request: ControlRequest,
    ) -> impl Future<Output = Result<ControlResponse>> + Send {
        (**self).send(tab, request)
    }

    fn attach(&self, tab: TabId) -> impl Future<Output = Result<()>> + Send {
        (**self).attach(tab)
    }
}

struct TabSlot {
    document: Arc<dyn Document>,
    engine_tx: Option<mpsc::Sender<PageEnvelope>>,
}

impl TabSlot {
    fn is_attached(&self) -> bool {
        self.engine_tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Drop the engine; its task finishes once queued requests are served
    fn detach(&mut self) {
        self.engine_tx = None;
    }
}

/// In-process tab host
///
/// Each attached tab runs its `PageContext` on a dedicated task, which gives
/// every page its own serial event loop. Pages share nothing but the domain
/// store.
pub struct TabHost {
    store: DomainStore,
    audio: AudioConfig,
    tabs: Mutex<HashMap<TabId, TabSlot>>,
}

impl TabHost {
    pub fn new(store: DomainStore, audio: AudioConfig) -> Self {
        Self {
            store,
            audio,
            tabs: Mutex::new(HashMap::new()),
        }
    }

    /// Register a tab showing `document`, without an engine
    pub async fn open_tab(&self, tab: TabId, document: Arc<dyn Document>) {
        debug!("Opened {} at {}", tab, document.location());
        self.tabs.lock().await.insert(
            tab,
            TabSlot {
                document,
                engine_tx: None,
            },
        );
    }

    /// Load a new page in a tab. The previous page's engine is torn down and
    /// the new page starts without one.
    pub async fn navigate(&self, tab: TabId, document: Arc<dyn Document>) -> Result<()> {
        let mut tabs = self.tabs.lock().await;
        let slot = tabs.get_mut(&tab).ok_or(Error::TabNotFound(tab))?;
        slot.detach();
        debug!("{} navigated to {}", tab, document.location());
        slot.document = document;
        Ok(())
    }

    /// Close a tab, tearing down its engine
    pub async fn close_tab(&self, tab: TabId) -> bool {
        let removed = self.tabs.lock().await.remove(&tab);
        if removed.is_some() {
            debug!("Closed {}", tab);
        }
        removed.is_some()
    }

    pub async fn is_attached(&self, tab: TabId) -> bool {
        self.tabs
            .lock()
            .await
            .get(&tab)
            .is_some_and(TabSlot::is_attached)
    }

    pub async fn tab_count(&self) -> usize {
        self.tabs.lock().await.len()
    }
}

impl PageTransport for TabHost {
    async fn send(&self, tab: TabId, request: ControlRequest) -> Result<ControlResponse> {
        let engine_tx = {
            let tabs = self.tabs.lock().await;
            tabs.get(&tab)
                .and_then(|slot| slot.engine_tx.clone())
                .ok_or(Error::ChannelUnavailable(tab))?
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        engine_tx
            .send(PageEnvelope {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| Error::ChannelUnavailable(tab))?;

        reply_rx.await.map_err(|_| Error::ChannelUnavailable(tab))
    }

    async fn attach(&self, tab: TabId) -> Result<()> {
        let mut tabs = self.tabs.lock().await;
        let slot = tabs.get_mut(&tab).ok_or(Error::TabNotFound(tab))?;
        if slot.is_attached() {
            return Ok(());
        }

        let context = PageContext::attach(slot.document.clone(), self.store.clone(), &self.audio).await;
        let (tx, rx) = mpsc::channel(PAGE_QUEUE_DEPTH);
        tokio::spawn(context.run(rx));
        slot.engine_tx = Some(tx);

        info!("Attached engine to {} ({})", tab, slot.document.location());
        Ok(())
    }
}
