//! Session scoping and orchestration.
//!
//! A session is one UI lifetime. Its token namespaces the proposal cache
//! so closing and reopening the UI starts a clean generation cycle without
//! disturbing the durable assignment/lock state, and without clobbering
//! another UI instance's in-progress proposals.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use specimen_content::Generator;
use specimen_document::{DocumentHost, NodeId, TypefaceLoader};

use crate::commit::CommitReport;
use crate::reconcile::{Action, Engine, LayerSummary};
use crate::state::StateStore;

/// Token scoping one UI lifetime's in-progress proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u32);

impl SessionId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints a fresh token each time a UI lifetime begins.
#[derive(Debug, Default)]
pub struct SessionCounter(AtomicU32);

impl SessionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> SessionId {
        SessionId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// How an aborted commit disposes of the session: interactive UIs reset to
/// their initial view, one-shot invocations terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Interactive,
    OneShot,
}

/// What the caller's surface should do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    None,
    ResetView,
    Terminate,
}

/// One operation's result: the refreshed per-layer view, a UI signal, and
/// at most one human-readable notice (set only for an aborted commit).
/// Per-layer no-ops never produce a notice; they go to the log channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub layers: Vec<LayerSummary>,
    pub signal: Signal,
    pub notice: Option<String>,
    pub report: Option<CommitReport>,
}

impl SessionOutcome {
    fn view(layers: Vec<LayerSummary>) -> Self {
        Self {
            layers,
            signal: Signal::None,
            notice: None,
            report: None,
        }
    }
}

/// One UI lifetime driving the engine over an explicit selection snapshot.
///
/// Bulk operations always run over the snapshot passed to
/// [`set_selection`](RemixSession::set_selection), re-flattened per
/// operation, never an implicitly re-derived "live" selection.
pub struct RemixSession<S, G> {
    engine: Engine<S, G>,
    session: SessionId,
    disposition: Disposition,
    selection: Vec<NodeId>,
}

impl<S: StateStore, G: Generator> RemixSession<S, G> {
    pub fn new(store: S, generator: G, session: SessionId, disposition: Disposition) -> Self {
        Self {
            engine: Engine::new(store, generator),
            session,
            disposition,
            selection: Vec::new(),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn engine(&self) -> &Engine<S, G> {
        &self.engine
    }

    /// Tear down the session, handing back the store and generator.
    pub fn into_parts(self) -> (S, G) {
        self.engine.into_parts()
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Replace the selection snapshot for subsequent operations.
    pub fn set_selection(&mut self, selection: Vec<NodeId>) {
        self.selection = selection;
    }

    /// Current view of every text layer in the selection.
    pub fn refresh<H: DocumentHost>(&mut self, host: &H) -> SessionOutcome {
        SessionOutcome::view(self.engine.refresh(host, &self.selection, self.session))
    }

    /// Apply a single-layer action and return the re-resolved view.
    pub fn apply<H: DocumentHost>(&mut self, host: &H, action: Action) -> SessionOutcome {
        SessionOutcome::view(self.engine.apply(host, &self.selection, action, self.session))
    }

    /// Remix every unlocked layer, then tell the UI to reset to its
    /// initial view.
    pub fn remix_all<H: DocumentHost>(&mut self, host: &H) -> SessionOutcome {
        let layers = self.engine.remix_all(host, &self.selection, self.session);
        SessionOutcome {
            layers,
            signal: Signal::ResetView,
            notice: None,
            report: None,
        }
    }

    /// Commit all eligible proposals.
    ///
    /// On success the outcome carries the commit report and a fresh view.
    /// On a global precondition failure it carries the single user-facing
    /// notice and the disposition-driven signal; no layer was touched.
    pub async fn commit<H, L>(&mut self, host: &mut H, loader: &L) -> SessionOutcome
    where
        H: DocumentHost,
        L: TypefaceLoader,
    {
        match self
            .engine
            .commit(host, loader, &self.selection, self.session)
            .await
        {
            Ok(report) => {
                let layers = self.engine.refresh(host, &self.selection, self.session);
                SessionOutcome {
                    layers,
                    signal: Signal::None,
                    notice: None,
                    report: Some(report),
                }
            }
            Err(err) => {
                let signal = match self.disposition {
                    Disposition::Interactive => Signal::ResetView,
                    Disposition::OneShot => Signal::Terminate,
                };
                SessionOutcome {
                    layers: Vec::new(),
                    signal,
                    notice: Some(err.user_message()),
                    report: None,
                }
            }
        }
    }
}
