//! In-memory document tree.
//!
//! A faithful stand-in for the host: an arena of nodes addressed by id,
//! with the same read/write surface a live document exposes. Downstream
//! crates test the whole pipeline against this.

use std::collections::HashMap;

use crate::node::{DocumentError, DocumentHost, NodeId, NodeKind};
use crate::typeface::Typeface;

/// One node in a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub visible: bool,
    pub locked: bool,
    pub characters: Option<String>,
    pub typefaces: Option<Vec<Typeface>>,
    pub children: Vec<NodeId>,
}

impl MemoryNode {
    fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            visible: true,
            locked: false,
            characters: None,
            typefaces: Some(Vec::new()),
            children: Vec::new(),
        }
    }

    pub fn text(id: impl Into<NodeId>, characters: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Text);
        node.characters = Some(characters.into());
        node.typefaces = Some(vec![Typeface::new("Inter", "Regular")]);
        node
    }

    pub fn group(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Group)
    }

    pub fn frame(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Frame)
    }

    pub fn component(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Component)
    }

    pub fn instance(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Instance)
    }

    pub fn shape(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Other)
    }

    pub fn with_children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Host-level lock, not the plugin's own lock state.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_typeface(mut self, family: &str, style: &str) -> Self {
        self.typefaces = Some(vec![Typeface::new(family, style)]);
        self
    }

    pub fn with_typefaces(mut self, faces: Vec<Typeface>) -> Self {
        self.typefaces = Some(faces);
        self
    }

    /// Simulate a node whose font information cannot be resolved.
    pub fn with_missing_typefaces(mut self) -> Self {
        self.typefaces = None;
        self
    }
}

/// Arena-backed implementation of [`DocumentHost`].
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: HashMap<NodeId, MemoryNode>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning its id for convenient wiring.
    pub fn insert(&mut self, node: MemoryNode) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    pub fn get(&self, id: &NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl DocumentHost for MemoryDocument {
    fn kind(&self, id: &NodeId) -> Option<NodeKind> {
        self.nodes.get(id).map(|n| n.kind)
    }

    fn children(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn visible(&self, id: &NodeId) -> bool {
        self.nodes.get(id).map(|n| n.visible).unwrap_or(false)
    }

    fn locked(&self, id: &NodeId) -> bool {
        self.nodes.get(id).map(|n| n.locked).unwrap_or(false)
    }

    fn characters(&self, id: &NodeId) -> Option<String> {
        self.nodes.get(id).and_then(|n| n.characters.clone())
    }

    fn set_characters(&mut self, id: &NodeId, text: &str) -> Result<(), DocumentError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))?;

        if node.kind != NodeKind::Text {
            return Err(DocumentError::NotText(id.clone()));
        }

        node.characters = Some(text.to_string());
        Ok(())
    }

    fn typefaces(&self, id: &NodeId) -> Option<Vec<Typeface>> {
        self.nodes.get(id).and_then(|n| n.typefaces.clone())
    }
}
