//! Per-layer persisted state and its storage adapter.
//!
//! The domain model is a typed record; how it lands in the document (as
//! namespaced string keys) is the adapter's business alone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use specimen_content::Category;
use specimen_document::{KeyValueStore, MemoryKeyValueStore, NodeId};

use crate::session::SessionId;

/// Content category assigned to a layer. Durable across sessions; only
/// explicit reassignment changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Assignment {
    #[default]
    Unassigned,
    Category(Category),
}

impl Assignment {
    pub fn category(&self) -> Option<Category> {
        match self {
            Assignment::Unassigned => None,
            Assignment::Category(c) => Some(*c),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Assignment::Unassigned)
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assignment::Unassigned => f.write_str("unassigned"),
            Assignment::Category(c) => c.fmt(f),
        }
    }
}

impl From<Assignment> for String {
    fn from(assignment: Assignment) -> Self {
        assignment.to_string()
    }
}

// Unknown strings read as the default, matching lazily-created metadata.
impl From<String> for Assignment {
    fn from(s: String) -> Self {
        match s.parse::<Category>() {
            Ok(category) => Assignment::Category(category),
            Err(_) => Assignment::Unassigned,
        }
    }
}

/// Plugin-owned metadata for one text layer.
///
/// `assignment` and `locked` are durable; `proposals` is a per-session
/// cache of candidate replacement text. An absent entry and one cleared to
/// null read the same (regenerate lazily), so clearing removes the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerState {
    pub assignment: Assignment,
    pub locked: bool,
    pub proposals: HashMap<SessionId, String>,
}

impl LayerState {
    pub fn proposal(&self, session: SessionId) -> Option<&str> {
        self.proposals.get(&session).map(String::as_str)
    }

    pub fn set_proposal(&mut self, session: SessionId, text: String) {
        self.proposals.insert(session, text);
    }

    pub fn clear_proposal(&mut self, session: SessionId) {
        self.proposals.remove(&session);
    }

    pub fn clear_all_proposals(&mut self) {
        self.proposals.clear();
    }
}

/// Storage seam for per-layer state.
///
/// Absent data reads as defaults; state persists with the document until
/// the node dies or fields are explicitly cleared.
pub trait StateStore {
    fn load(&self, node: &NodeId) -> LayerState;
    fn save(&mut self, node: &NodeId, state: &LayerState);
}

const KEY_ASSIGNMENT: &str = "assignment";
const KEY_LOCKED: &str = "locked";
const PROPOSAL_PREFIX: &str = "proposal/";

/// Persists [`LayerState`] through namespaced per-node string keys:
/// `assignment`, `locked`, and one `proposal/<session>` key per cached
/// proposal. Stale proposal keys are deleted on save.
pub struct PluginDataStore<K> {
    kv: K,
}

impl<K: KeyValueStore> PluginDataStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn into_inner(self) -> K {
        self.kv
    }
}

impl PluginDataStore<MemoryKeyValueStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryKeyValueStore::new())
    }
}

impl<K: KeyValueStore> StateStore for PluginDataStore<K> {
    fn load(&self, node: &NodeId) -> LayerState {
        let assignment = self
            .kv
            .get(node, KEY_ASSIGNMENT)
            .map(Assignment::from)
            .unwrap_or_default();

        let locked = self
            .kv
            .get(node, KEY_LOCKED)
            .map(|v| v == "true")
            .unwrap_or(false);

        let mut proposals = HashMap::new();
        for key in self.kv.keys(node) {
            if let Some(rest) = key.strip_prefix(PROPOSAL_PREFIX) {
                if let Ok(session) = rest.parse::<u32>() {
                    if let Some(text) = self.kv.get(node, &key) {
                        proposals.insert(SessionId::new(session), text);
                    }
                }
            }
        }

        LayerState {
            assignment,
            locked,
            proposals,
        }
    }

    fn save(&mut self, node: &NodeId, state: &LayerState) {
        let assignment = state.assignment.to_string();
        self.kv.set(node, KEY_ASSIGNMENT, Some(&assignment));
        self.kv
            .set(node, KEY_LOCKED, Some(if state.locked { "true" } else { "false" }));

        for key in self.kv.keys(node) {
            let stale = key
                .strip_prefix(PROPOSAL_PREFIX)
                .and_then(|rest| rest.parse::<u32>().ok())
                .map(|session| !state.proposals.contains_key(&SessionId::new(session)))
                .unwrap_or(false);
            if stale {
                self.kv.set(node, &key, None);
            }
        }

        for (session, text) in &state.proposals {
            let key = format!("{PROPOSAL_PREFIX}{session}");
            self.kv.set(node, &key, Some(text));
        }
    }
}
