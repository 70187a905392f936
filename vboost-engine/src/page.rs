//! Page model: location, media elements, and the document they live in
//!
//! Media elements are identified by an opaque handle minted at creation.
//! Two elements with identical attributes (same kind, same source) are still
//! different elements, so nothing here derives identity from attributes.

use serde::Serialize;
use std::fmt;
use std::sync::RwLock;
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// Identity handle of a media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(Uuid);

impl ElementId {
    fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playable element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    Audio,
    Video,
}

/// A playable element in the page content tree
#[derive(Debug, Clone, Serialize)]
pub struct MediaElement {
    id: ElementId,
    pub kind: MediaKind,
    pub src: Option<String>,
}

impl MediaElement {
    /// Create an element with a fresh identity
    pub fn new(kind: MediaKind, src: Option<String>) -> Self {
        Self {
            id: ElementId::mint(),
            kind,
            src,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}

/// Parsed page address
///
/// Only the pieces the engine needs are kept: the scheme and the hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    scheme: String,
    host: String,
}

impl PageLocation {
    /// Parse an address such as `https://user@www.example.com:8443/watch?v=1`.
    ///
    /// Never fails. Hostnames come out the way a browser reports them
    /// (lowercased, IDNA-encoded). Addresses without a host, and addresses
    /// that do not parse at all, have no domain.
    pub fn parse(address: &str) -> Self {
        match Url::parse(address.trim()) {
            Ok(url) => Self {
                scheme: url.scheme().to_string(),
                host: url.host_str().unwrap_or_default().to_string(),
            },
            Err(e) => {
                debug!("Unparseable page address {:?}: {}", address, e);
                Self {
                    scheme: String::new(),
                    host: String::new(),
                }
            }
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the page was served over http(s)
    pub fn is_web(&self) -> bool {
        matches!(self.scheme.as_str(), "http" | "https")
    }

    /// Persistence key for this page; `None` for non-http(s) pages
    pub fn domain(&self) -> Option<&str> {
        if self.is_web() && !self.host.is_empty() {
            Some(&self.host)
        } else {
            None
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// The page's content tree, as far as the engine is concerned
pub trait Document: Send + Sync {
    /// Address of the page
    fn location(&self) -> &PageLocation;

    /// Snapshot of playable elements currently in the content tree
    fn media_elements(&self) -> Vec<MediaElement>;
}

/// In-memory document whose element list can change while the page lives
#[derive(Debug)]
pub struct StaticDocument {
    location: PageLocation,
    elements: RwLock<Vec<MediaElement>>,
}

impl StaticDocument {
    pub fn new(address: &str) -> Self {
        Self {
            location: PageLocation::parse(address),
            elements: RwLock::new(Vec::new()),
        }
    }

    /// Insert a new element and return it
    pub fn add_element(&self, kind: MediaKind, src: Option<&str>) -> MediaElement {
        let element = MediaElement::new(kind, src.map(str::to_string));
        self.elements
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(element.clone());
        element
    }

    /// Remove an element from the content tree
    pub fn remove_element(&self, id: ElementId) -> bool {
        let mut elements = self.elements.write().unwrap_or_else(|e| e.into_inner());
        let len_before = elements.len();
        elements.retain(|e| e.id() != id);
        elements.len() < len_before
    }
}

impl Document for StaticDocument {
    fn location(&self) -> &PageLocation {
        &self.location
    }

    fn media_elements(&self) -> Vec<MediaElement> {
        self.elements
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
