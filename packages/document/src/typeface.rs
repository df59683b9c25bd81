//! Typeface descriptors and the asynchronous loading gate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single typeface a text node renders with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Typeface {
    pub family: String,
    pub style: String,
}

impl Typeface {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl std::fmt::Display for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypefaceError {
    #[error("Failed to load typeface: {0}")]
    LoadFailed(Typeface),
}

/// Makes typefaces available for rendering before text using them is
/// mutated.
///
/// The host processes one UI-originated action at a time, so a pending load
/// suspends the current operation cooperatively; no other mutation runs
/// against the same selection while a load is outstanding. A failed load is
/// terminal for the whole operation that requested it.
#[allow(async_fn_in_trait)]
pub trait TypefaceLoader {
    async fn load(&self, faces: &[Typeface]) -> Result<(), TypefaceError>;
}

/// Loader that treats every typeface as already available.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantLoader;

impl TypefaceLoader for InstantLoader {
    async fn load(&self, _faces: &[Typeface]) -> Result<(), TypefaceError> {
        Ok(())
    }
}
