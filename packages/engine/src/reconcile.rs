//! Assignment/state reconciliation.
//!
//! For every text leaf in the current selection, the engine resolves one
//! summary record: what category the layer is assigned, what it currently
//! says, what it would say after a commit, and whether it is locked. The
//! read path is idempotent; proposals are generated lazily, at most once
//! per layer per session, and every mutation re-resolves the full
//! selection so callers never observe partial state.

use serde::{Deserialize, Serialize};
use specimen_content::Generator;
use specimen_document::{DocumentHost, NodeId};
use tracing::{debug, warn};

use crate::flatten::flatten_selection;
use crate::session::SessionId;
use crate::state::{Assignment, StateStore};

/// View-ready summary of one text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub id: NodeId,
    pub assignment: Assignment,
    pub original: String,
    pub proposed: String,
    pub locked: bool,
}

/// User actions addressed at a single layer in the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Change the layer's content category. Clears the cached proposal so
    /// the next refresh regenerates; never generates synchronously.
    Reassign { id: NodeId, assignment: Assignment },

    /// Replace the cached proposal with freshly generated content.
    Remix { id: NodeId },

    /// Revert the proposal to the layer's original content, keeping the
    /// assignment.
    Restore { id: NodeId },

    /// Flip the plugin-level lock. Locking snaps the proposal back to the
    /// original; unlocking immediately regenerates.
    ToggleLock { id: NodeId },
}

impl Action {
    pub fn id(&self) -> &NodeId {
        match self {
            Action::Reassign { id, .. } => id,
            Action::Remix { id } => id,
            Action::Restore { id } => id,
            Action::ToggleLock { id } => id,
        }
    }
}

/// The reconciliation engine.
///
/// Owns the state store and the text-generation oracle; borrows the host
/// document per call. The session token is an explicit parameter on every
/// operation, never ambient state.
pub struct Engine<S, G> {
    pub(crate) store: S,
    pub(crate) generator: G,
}

impl<S: StateStore, G: Generator> Engine<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (S, G) {
        (self.store, self.generator)
    }

    /// Resolve every text layer in the selection, lazily filling the
    /// session's proposal cache. Repeated refreshes do not regenerate.
    pub fn refresh<H: DocumentHost>(
        &mut self,
        host: &H,
        selection: &[NodeId],
        session: SessionId,
    ) -> Vec<LayerSummary> {
        flatten_selection(host, selection, false)
            .into_iter()
            .filter_map(|id| self.resolve(host, &id, session))
            .collect()
    }

    /// Apply one action, then re-resolve the full selection.
    ///
    /// A target outside the current flattened selection is logged and
    /// ignored; the caller still gets a consistent view back.
    pub fn apply<H: DocumentHost>(
        &mut self,
        host: &H,
        selection: &[NodeId],
        action: Action,
        session: SessionId,
    ) -> Vec<LayerSummary> {
        let ids = flatten_selection(host, selection, false);
        if ids.contains(action.id()) {
            self.apply_resolved(host, action, session);
        } else {
            warn!(node = %action.id(), "action targets a node outside the current selection");
        }
        self.refresh(host, selection, session)
    }

    /// Remix every unlocked layer in the selection. Locked layers keep
    /// their proposals untouched.
    pub fn remix_all<H: DocumentHost>(
        &mut self,
        host: &H,
        selection: &[NodeId],
        session: SessionId,
    ) -> Vec<LayerSummary> {
        for id in flatten_selection(host, selection, false) {
            self.remix(&id, session);
        }
        self.refresh(host, selection, session)
    }

    fn resolve<H: DocumentHost>(
        &mut self,
        host: &H,
        id: &NodeId,
        session: SessionId,
    ) -> Option<LayerSummary> {
        let original = host.characters(id)?;
        let mut state = self.store.load(id);

        let proposed = match state.assignment.category() {
            // No assignment, no proposal.
            None => original.clone(),
            // Locked layers never show generated content.
            Some(_) if state.locked => original.clone(),
            Some(category) => match state.proposal(session) {
                Some(text) => text.to_string(),
                None => {
                    let text = self.generator.generate(category);
                    debug!(node = %id, %category, "generated proposal");
                    state.set_proposal(session, text.clone());
                    self.store.save(id, &state);
                    text
                }
            },
        };

        Some(LayerSummary {
            id: id.clone(),
            assignment: state.assignment,
            original,
            proposed,
            locked: state.locked,
        })
    }

    fn apply_resolved<H: DocumentHost>(&mut self, host: &H, action: Action, session: SessionId) {
        match action {
            Action::Reassign { id, assignment } => self.reassign(&id, assignment, session),
            Action::Remix { id } => self.remix(&id, session),
            Action::Restore { id } => self.restore(host, &id, session),
            Action::ToggleLock { id } => self.toggle_lock(host, &id, session),
        }
    }

    fn reassign(&mut self, id: &NodeId, assignment: Assignment, session: SessionId) {
        let mut state = self.store.load(id);
        if state.locked {
            debug!(node = %id, "reassign ignored: layer is locked");
            return;
        }

        state.assignment = assignment;
        if assignment.is_unassigned() {
            // No assignment, no proposal, in any session.
            state.clear_all_proposals();
        } else {
            state.clear_proposal(session);
        }
        self.store.save(id, &state);
    }

    fn remix(&mut self, id: &NodeId, session: SessionId) {
        let mut state = self.store.load(id);
        if state.locked {
            debug!(node = %id, "remix ignored: layer is locked");
            return;
        }
        let Some(category) = state.assignment.category() else {
            debug!(node = %id, "remix ignored: layer is unassigned");
            return;
        };

        state.set_proposal(session, self.generator.generate(category));
        self.store.save(id, &state);
    }

    fn restore<H: DocumentHost>(&mut self, host: &H, id: &NodeId, session: SessionId) {
        let mut state = self.store.load(id);
        if state.locked {
            debug!(node = %id, "restore ignored: layer is locked");
            return;
        }
        if state.assignment.is_unassigned() {
            // Unassigned layers already display their original content.
            return;
        }

        if let Some(original) = host.characters(id) {
            state.set_proposal(session, original);
            self.store.save(id, &state);
        }
    }

    fn toggle_lock<H: DocumentHost>(&mut self, host: &H, id: &NodeId, session: SessionId) {
        let mut state = self.store.load(id);
        state.locked = !state.locked;

        if let Some(category) = state.assignment.category() {
            if state.locked {
                // Visible state reverts to the original while locked.
                if let Some(original) = host.characters(id) {
                    state.set_proposal(session, original);
                }
            } else {
                // Unlocking immediately shows fresh content.
                state.set_proposal(session, self.generator.generate(category));
            }
        }

        debug!(node = %id, locked = state.locked, "lock toggled");
        self.store.save(id, &state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specimen_content::{Category, SequenceGenerator};
    use specimen_document::{MemoryDocument, MemoryNode};

    use crate::state::PluginDataStore;

    type TestEngine = Engine<PluginDataStore<specimen_document::MemoryKeyValueStore>, SequenceGenerator>;

    fn engine() -> TestEngine {
        Engine::new(PluginDataStore::in_memory(), SequenceGenerator::new())
    }

    fn assign(engine: &mut TestEngine, id: &str, category: Category) {
        let mut state = engine.store.load(&NodeId::from(id));
        state.assignment = Assignment::Category(category);
        engine.store.save(&NodeId::from(id), &state);
    }

    fn one_text_doc() -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new();
        let id = doc.insert(MemoryNode::text("t1", "Lorem"));
        (doc, vec![id])
    }

    #[test]
    fn test_unassigned_layer_shows_original() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();

        let view = engine.refresh(&doc, &selection, SessionId::new(1));

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].assignment, Assignment::Unassigned);
        assert_eq!(view[0].proposed, "Lorem");
        // Nothing was cached for an unassigned layer.
        assert!(engine.store.load(&view[0].id).proposals.is_empty());
    }

    #[test]
    fn test_refresh_generates_once_per_session() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        let first = engine.refresh(&doc, &selection, session);
        let second = engine.refresh(&doc, &selection, session);

        assert_eq!(first[0].proposed, second[0].proposed);
        assert_ne!(first[0].proposed, "Lorem");
    }

    #[test]
    fn test_sessions_do_not_share_proposals() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let a = engine.refresh(&doc, &selection, SessionId::new(1));
        let b = engine.refresh(&doc, &selection, SessionId::new(2));

        // The sequence generator advanced between sessions.
        assert_ne!(a[0].proposed, b[0].proposed);

        let state = engine.store.load(&NodeId::from("t1"));
        assert_eq!(state.proposals.len(), 2);
    }

    #[test]
    fn test_reassign_clears_cached_proposal() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        let before = engine.refresh(&doc, &selection, session);

        let view = engine.apply(
            &doc,
            &selection,
            Action::Reassign {
                id: NodeId::from("t1"),
                assignment: Assignment::Category(Category::Animal),
            },
            session,
        );

        assert_eq!(view[0].assignment, Assignment::Category(Category::Animal));
        // The old category's proposal is gone for good.
        assert_ne!(view[0].proposed, before[0].proposed);
    }

    #[test]
    fn test_reassign_to_unassigned_clears_every_session() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        engine.refresh(&doc, &selection, SessionId::new(1));
        engine.refresh(&doc, &selection, SessionId::new(2));

        engine.apply(
            &doc,
            &selection,
            Action::Reassign {
                id: NodeId::from("t1"),
                assignment: Assignment::Unassigned,
            },
            SessionId::new(1),
        );

        let state = engine.store.load(&NodeId::from("t1"));
        assert!(state.proposals.is_empty());
    }

    #[test]
    fn test_remix_replaces_proposal() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        let before = engine.refresh(&doc, &selection, session);
        let after = engine.apply(
            &doc,
            &selection,
            Action::Remix {
                id: NodeId::from("t1"),
            },
            session,
        );

        assert_ne!(before[0].proposed, after[0].proposed);
    }

    #[test]
    fn test_restore_reverts_to_original_keeping_assignment() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        engine.refresh(&doc, &selection, session);
        let view = engine.apply(
            &doc,
            &selection,
            Action::Restore {
                id: NodeId::from("t1"),
            },
            session,
        );

        assert_eq!(view[0].proposed, "Lorem");
        assert_eq!(view[0].assignment, Assignment::Category(Category::Name));
    }

    #[test]
    fn test_lock_round_trip() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        engine.refresh(&doc, &selection, session);

        let locked = engine.apply(
            &doc,
            &selection,
            Action::ToggleLock {
                id: NodeId::from("t1"),
            },
            session,
        );
        assert!(locked[0].locked);
        assert_eq!(locked[0].proposed, "Lorem");

        let unlocked = engine.apply(
            &doc,
            &selection,
            Action::ToggleLock {
                id: NodeId::from("t1"),
            },
            session,
        );
        assert!(!unlocked[0].locked);
        assert_ne!(unlocked[0].proposed, "Lorem");
    }

    #[test]
    fn test_locked_layer_rejects_mutations() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        engine.refresh(&doc, &selection, session);
        let locked = engine.apply(
            &doc,
            &selection,
            Action::ToggleLock {
                id: NodeId::from("t1"),
            },
            session,
        );

        let after_remix = engine.apply(
            &doc,
            &selection,
            Action::Remix {
                id: NodeId::from("t1"),
            },
            session,
        );
        assert_eq!(after_remix, locked);

        let after_reassign = engine.apply(
            &doc,
            &selection,
            Action::Reassign {
                id: NodeId::from("t1"),
                assignment: Assignment::Category(Category::Color),
            },
            session,
        );
        assert_eq!(after_reassign[0].assignment, Assignment::Category(Category::Name));
    }

    #[test]
    fn test_action_on_unknown_node_is_a_noop() {
        let (doc, selection) = one_text_doc();
        let mut engine = engine();
        assign(&mut engine, "t1", Category::Name);

        let session = SessionId::new(1);
        let before = engine.refresh(&doc, &selection, session);
        let after = engine.apply(
            &doc,
            &selection,
            Action::Remix {
                id: NodeId::from("ghost"),
            },
            session,
        );

        assert_eq!(before, after);
    }

    #[test]
    fn test_remix_all_skips_locked_layers() {
        let mut doc = MemoryDocument::new();
        let mut ids = Vec::new();
        for (i, original) in ["a", "b", "c", "d"].iter().enumerate() {
            ids.push(doc.insert(MemoryNode::text(format!("t{i}"), *original)));
        }

        let mut engine = engine();
        for i in 0..4 {
            assign(&mut engine, &format!("t{i}"), Category::Name);
        }

        let session = SessionId::new(1);
        engine.refresh(&doc, &ids, session);

        // Lock the last layer.
        engine.apply(
            &doc,
            &ids,
            Action::ToggleLock {
                id: NodeId::from("t3"),
            },
            session,
        );
        let before = engine.refresh(&doc, &ids, session);

        let after = engine.remix_all(&doc, &ids, session);

        for i in 0..3 {
            assert_ne!(after[i].proposed, before[i].proposed, "layer {i} not remixed");
        }
        assert_eq!(after[3].proposed, before[3].proposed);
        assert_eq!(after[3].proposed, "d");
    }

    #[test]
    fn test_action_serialization_round_trip() {
        let action = Action::Reassign {
            id: NodeId::from("t1"),
            assignment: Assignment::Category(Category::City),
        };

        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, back);
    }
}
