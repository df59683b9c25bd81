//! Per-node string metadata, namespaced so unrelated consumers of the same
//! document never collide.

use std::collections::HashMap;

use crate::node::NodeId;

/// Namespace under which all of this plugin's metadata is stored.
pub const PLUGIN_NAMESPACE: &str = "specimen";

/// Per-node key/value metadata attached to the document.
///
/// Values persist with the document until the node is deleted or a key is
/// explicitly cleared. The namespace prefix is an implementation detail of
/// the store, invisible to callers.
pub trait KeyValueStore {
    fn get(&self, node: &NodeId, key: &str) -> Option<String>;

    /// Write a value; `None` deletes the key.
    fn set(&mut self, node: &NodeId, key: &str, value: Option<&str>);

    /// Every key currently set for a node, without the namespace prefix.
    fn keys(&self, node: &NodeId) -> Vec<String>;
}

/// In-memory `KeyValueStore`.
#[derive(Debug)]
pub struct MemoryKeyValueStore {
    namespace: String,
    entries: HashMap<NodeId, HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::with_namespace(PLUGIN_NAMESPACE)
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: HashMap::new(),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, node: &NodeId, key: &str) -> Option<String> {
        self.entries.get(node)?.get(&self.scoped(key)).cloned()
    }

    fn set(&mut self, node: &NodeId, key: &str, value: Option<&str>) {
        let scoped = self.scoped(key);
        match value {
            Some(value) => {
                self.entries
                    .entry(node.clone())
                    .or_default()
                    .insert(scoped, value.to_string());
            }
            None => {
                if let Some(keys) = self.entries.get_mut(node) {
                    keys.remove(&scoped);
                    if keys.is_empty() {
                        self.entries.remove(node);
                    }
                }
            }
        }
    }

    fn keys(&self, node: &NodeId) -> Vec<String> {
        let prefix = self.scoped("");
        let mut keys: Vec<String> = self
            .entries
            .get(node)
            .map(|m| {
                m.keys()
                    .filter_map(|k| k.strip_prefix(&prefix))
                    .map(|k| k.to_string())
                    .collect()
            })
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_round_trip() {
        let mut store = MemoryKeyValueStore::new();
        let node = NodeId::from("n1");

        store.set(&node, "assignment", Some("name"));
        assert_eq!(store.get(&node, "assignment"), Some("name".to_string()));
    }

    #[test]
    fn test_none_deletes_key() {
        let mut store = MemoryKeyValueStore::new();
        let node = NodeId::from("n1");

        store.set(&node, "locked", Some("true"));
        store.set(&node, "locked", None);

        assert_eq!(store.get(&node, "locked"), None);
        assert!(store.keys(&node).is_empty());
    }

    #[test]
    fn test_keys_strip_namespace() {
        let mut store = MemoryKeyValueStore::new();
        let node = NodeId::from("n1");

        store.set(&node, "proposal/1", Some("Jane"));
        store.set(&node, "proposal/2", Some("June"));

        assert_eq!(store.keys(&node), vec!["proposal/1", "proposal/2"]);
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let mut a = MemoryKeyValueStore::with_namespace("a");
        let node = NodeId::from("n1");
        a.set(&node, "k", Some("v"));

        // A store scoped to a different namespace sees nothing.
        let b = MemoryKeyValueStore::with_namespace("b");
        assert_eq!(b.get(&node, "k"), None);
    }

    #[test]
    fn test_absent_node_reads_empty() {
        let store = MemoryKeyValueStore::new();
        let node = NodeId::from("ghost");

        assert_eq!(store.get(&node, "assignment"), None);
        assert!(store.keys(&node).is_empty());
    }
}
