//! # Specimen Document
//!
//! Capability model for the host document tree.
//!
//! The host application exclusively owns node existence and raw text
//! content; this crate defines the seams the rest of the system reads and
//! writes through:
//!
//! - [`DocumentHost`]: traversal and text access for a tree of nodes
//! - [`KeyValueStore`]: namespaced per-node metadata owned by the plugin
//! - [`TypefaceLoader`]: asynchronous font availability gate
//!
//! [`MemoryDocument`] implements `DocumentHost` over an in-memory arena so
//! everything downstream can be exercised without a live host.

pub mod memory;
pub mod node;
pub mod plugin_data;
pub mod typeface;

pub use memory::*;
pub use node::*;
pub use plugin_data::*;
pub use typeface::*;
