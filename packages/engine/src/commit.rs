//! The commit pass: materialize proposed text into document content.
//!
//! Commit is all-or-nothing at the pass level: global preconditions (an
//! empty selection, any layer with unresolvable fonts, a failed typeface
//! load) abort before a single layer is touched. Once past the gates,
//! layers materialize one at a time in selection order; per-layer skips
//! are logged and counted, never fatal.

use std::collections::HashSet;

use serde::Serialize;
use specimen_content::Generator;
use specimen_document::{DocumentError, DocumentHost, NodeId, Typeface, TypefaceLoader};
use tracing::{debug, info, warn};

use crate::errors::{CommitError, CommitSkip};
use crate::flatten::flatten_selection;
use crate::reconcile::Engine;
use crate::session::SessionId;
use crate::state::StateStore;

/// Counts from a completed commit pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub written: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

enum Materialized {
    Written,
    Unchanged,
    Skipped(CommitSkip),
}

impl<S: StateStore, G: Generator> Engine<S, G> {
    /// Materialize every eligible proposal in the selection.
    ///
    /// Suspends on typeface loading; the host processes one UI action at a
    /// time, so nothing else mutates the selection while the load is
    /// outstanding. Layers materialize in selection order.
    pub async fn commit<H, L>(
        &mut self,
        host: &mut H,
        loader: &L,
        selection: &[NodeId],
        session: SessionId,
    ) -> Result<CommitReport, CommitError>
    where
        H: DocumentHost,
        L: TypefaceLoader,
    {
        let ids = flatten_selection(host, selection, false);
        if ids.is_empty() {
            let locked_only = !flatten_selection(host, selection, true).is_empty();
            return Err(CommitError::EmptySelection { locked_only });
        }

        // Font availability is a single up-front gate across the whole
        // batch; no layer is touched until every typeface is resolved and
        // loaded.
        let mut missing: Vec<NodeId> = Vec::new();
        let mut faces: Vec<Typeface> = Vec::new();
        let mut seen: HashSet<Typeface> = HashSet::new();
        for id in &ids {
            match host.typefaces(id) {
                None => missing.push(id.clone()),
                Some(list) => {
                    for face in list {
                        if seen.insert(face.clone()) {
                            faces.push(face);
                        }
                    }
                }
            }
        }
        if !missing.is_empty() {
            warn!(layers = missing.len(), "commit aborted: missing fonts");
            return Err(CommitError::MissingFonts { layers: missing });
        }

        loader.load(&faces).await?;

        let mut report = CommitReport::default();
        for id in &ids {
            match self.materialize(host, id, session)? {
                Materialized::Written => report.written += 1,
                Materialized::Unchanged => report.unchanged += 1,
                Materialized::Skipped(reason) => {
                    debug!(node = %id, %reason, "layer skipped during commit");
                    report.skipped += 1;
                }
            }
        }

        info!(
            written = report.written,
            unchanged = report.unchanged,
            skipped = report.skipped,
            "commit pass complete"
        );
        Ok(report)
    }

    /// Short-circuit rules for one layer, evaluated in order: plugin lock,
    /// missing assignment, missing proposal, unchanged content, write.
    fn materialize<H: DocumentHost>(
        &mut self,
        host: &mut H,
        id: &NodeId,
        session: SessionId,
    ) -> Result<Materialized, CommitError> {
        let state = self.store.load(id);

        if state.locked {
            return Ok(Materialized::Skipped(CommitSkip::Locked));
        }
        if state.assignment.is_unassigned() {
            return Ok(Materialized::Skipped(CommitSkip::Unassigned));
        }
        let Some(proposed) = state.proposal(session) else {
            return Ok(Materialized::Skipped(CommitSkip::MissingProposal));
        };

        let current = host
            .characters(id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))?;
        if proposed == current {
            return Ok(Materialized::Unchanged);
        }

        host.set_characters(id, proposed)?;
        Ok(Materialized::Written)
    }
}
