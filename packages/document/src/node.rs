//! Node identity, classification, and the host capability trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::typeface::Typeface;

/// Stable, unique, opaque identifier for a document node.
///
/// Identity is owned by the host; the rest of the system only ever compares
/// and stores these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Classification of document nodes.
///
/// Groups and top-level frames are plain containers; components and
/// instances own children but are treated as opaque boundaries that text is
/// pulled out of. Anything that is neither a container nor text is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Group,
    Frame,
    Component,
    Instance,
    Text,
    Other,
}

impl NodeKind {
    /// Containers expanded transparently during selection flattening.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Group | NodeKind::Frame)
    }

    /// Component-like nodes searched for nested text.
    pub fn is_instance_like(&self) -> bool {
        matches!(self, NodeKind::Component | NodeKind::Instance)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not text: {0}")]
    NotText(NodeId),
}

/// Capability set the host document exposes to the plugin.
///
/// Reads are total over the tree (`None`/`false`/empty for unknown ids so a
/// stale selection never panics); the only write is text content.
pub trait DocumentHost {
    fn kind(&self, id: &NodeId) -> Option<NodeKind>;

    /// Ordered children of a container node; empty for leaves and unknown ids.
    fn children(&self, id: &NodeId) -> Vec<NodeId>;

    fn visible(&self, id: &NodeId) -> bool;

    /// Host-level lock flag. Distinct from any plugin-owned lock state.
    fn locked(&self, id: &NodeId) -> bool;

    /// Visible text content of a text node.
    fn characters(&self, id: &NodeId) -> Option<String>;

    fn set_characters(&mut self, id: &NodeId, text: &str) -> Result<(), DocumentError>;

    /// Distinct typefaces in use across the node's character ranges.
    ///
    /// `None` means the node's font information cannot be resolved (a
    /// missing font); callers must treat that as a hard stop before any
    /// content mutation.
    fn typefaces(&self, id: &NodeId) -> Option<Vec<Typeface>>;
}
