//! # Specimen Engine
//!
//! Core engine for replacing placeholder text in a design document with
//! realistic sample content.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ flatten: selection → text-bearing leaves    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ reconcile: per-layer assignment/lock state  │
//! │  - lazily generate proposals per session    │
//! │  - reassign / remix / restore / lock        │
//! │  - always returns a fully re-resolved view  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ commit: gate on fonts, write proposals      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The host owns the tree**: the engine reads and writes through the
//!    `DocumentHost` capability trait, never owning node lifetime
//! 2. **Durable vs session state**: assignment and lock persist with the
//!    document; proposed text is scoped to one UI session's token
//! 3. **No partial views**: every mutation re-resolves the whole selection
//! 4. **Per-layer trouble is logged, not thrown**: only global commit
//!    preconditions (empty selection, missing fonts) abort an operation

mod commit;
mod errors;
mod flatten;
mod reconcile;
mod session;
mod state;

pub use commit::CommitReport;
pub use errors::{CommitError, CommitSkip};
pub use flatten::flatten_selection;
pub use reconcile::{Action, Engine, LayerSummary};
pub use session::{
    Disposition, RemixSession, SessionCounter, SessionId, SessionOutcome, Signal,
};
pub use state::{Assignment, LayerState, PluginDataStore, StateStore};

// Re-export the seams callers implement or construct against.
pub use specimen_content::{Category, Generator, PoolGenerator, SequenceGenerator};
pub use specimen_document::{
    DocumentHost, InstantLoader, KeyValueStore, MemoryDocument, MemoryKeyValueStore, MemoryNode,
    NodeId, NodeKind, Typeface, TypefaceError, TypefaceLoader,
};
