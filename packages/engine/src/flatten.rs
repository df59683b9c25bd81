//! Selection flattening.
//!
//! A document selection is heterogeneous: text layers sit next to groups,
//! frames, components, and instances, nested arbitrarily. Everything the
//! engine does operates on the flat, ordered set of text-bearing leaves
//! reachable from that selection.

use std::collections::{HashSet, VecDeque};

use specimen_document::{DocumentHost, NodeId, NodeKind};
use tracing::warn;

/// Flatten an ordered selection into its text-bearing leaf nodes.
///
/// Containers (groups and frames) expand breadth-first; text nested inside
/// visible components and instances is collected at any depth; host-locked
/// text is dropped unless `include_locked`. No node appears twice. An empty
/// or text-free selection yields an empty result, never an error.
pub fn flatten_selection<H: DocumentHost>(
    host: &H,
    selection: &[NodeId],
    include_locked: bool,
) -> Vec<NodeId> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<NodeId> = selection.iter().cloned().collect();
    let mut candidates: Vec<NodeId> = Vec::new();

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        match host.kind(&id) {
            Some(kind) if kind.is_container() => {
                for child in host.children(&id) {
                    queue.push_back(child);
                }
            }
            Some(_) => candidates.push(id),
            None => {
                warn!(node = %id, "selection references an unknown node");
            }
        }
    }

    let mut texts: Vec<NodeId> = Vec::new();
    let mut picked: HashSet<NodeId> = HashSet::new();
    for id in candidates {
        match host.kind(&id) {
            Some(NodeKind::Text) => {
                if picked.insert(id.clone()) {
                    texts.push(id);
                }
            }
            Some(kind) if kind.is_instance_like() => {
                collect_nested_text(host, &id, &mut texts, &mut picked);
            }
            _ => {}
        }
    }

    if include_locked {
        texts
    } else {
        texts.into_iter().filter(|id| !host.locked(id)).collect()
    }
}

/// Depth-first collection of text leaves under a component or instance.
/// Invisible component/instance subtrees are skipped entirely.
fn collect_nested_text<H: DocumentHost>(
    host: &H,
    root: &NodeId,
    out: &mut Vec<NodeId>,
    picked: &mut HashSet<NodeId>,
) {
    if !host.visible(root) {
        return;
    }

    let mut stack: Vec<NodeId> = host.children(root).into_iter().rev().collect();
    while let Some(id) = stack.pop() {
        match host.kind(&id) {
            Some(NodeKind::Text) => {
                if picked.insert(id.clone()) {
                    out.push(id);
                }
            }
            Some(kind) if kind.is_instance_like() && !host.visible(&id) => {}
            Some(_) => {
                for child in host.children(&id).into_iter().rev() {
                    stack.push(child);
                }
            }
            None => {}
        }
    }
}
