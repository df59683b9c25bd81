//! Error types for the engine.

use specimen_document::{DocumentError, NodeId, TypefaceError};
use thiserror::Error;

/// Per-layer reasons a commit pass skips a node.
///
/// These are recovered locally: logged, counted, never surfaced to the end
/// user and never fatal to the rest of the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSkip {
    /// The layer is locked by the plugin.
    Locked,
    /// The layer has no content category assigned.
    Unassigned,
    /// No proposal exists for the active session.
    MissingProposal,
}

impl std::fmt::Display for CommitSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CommitSkip::Locked => "locked",
            CommitSkip::Unassigned => "unassigned",
            CommitSkip::MissingProposal => "missing proposal",
        })
    }
}

/// Global preconditions that abort a whole commit pass before any layer is
/// touched.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("no text layers in selection")]
    EmptySelection {
        /// True when the selection only emptied out because host-locked
        /// layers were filtered away.
        locked_only: bool,
    },

    #[error("{} layer(s) have missing fonts", layers.len())]
    MissingFonts { layers: Vec<NodeId> },

    #[error("Typeface load failed: {0}")]
    TypefaceLoad(#[from] TypefaceError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl CommitError {
    /// The single short human-readable message surfaced per aborted pass.
    pub fn user_message(&self) -> String {
        match self {
            CommitError::EmptySelection { locked_only: false } => {
                "Select at least one text layer".to_string()
            }
            CommitError::EmptySelection { locked_only: true } => {
                "Select at least one unlocked text layer".to_string()
            }
            CommitError::MissingFonts { layers } if layers.len() == 1 => {
                "A selected layer has a missing font. Replace it and try again.".to_string()
            }
            CommitError::MissingFonts { layers } => format!(
                "{} selected layers have missing fonts. Replace them and try again.",
                layers.len()
            ),
            CommitError::TypefaceLoad(_) => {
                "Fonts for the selected layers could not be loaded".to_string()
            }
            CommitError::Document(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fonts_message_singular_vs_plural() {
        let one = CommitError::MissingFonts {
            layers: vec![NodeId::from("a")],
        };
        let two = CommitError::MissingFonts {
            layers: vec![NodeId::from("a"), NodeId::from("b")],
        };

        assert_eq!(
            one.user_message(),
            "A selected layer has a missing font. Replace it and try again."
        );
        assert_eq!(
            two.user_message(),
            "2 selected layers have missing fonts. Replace them and try again."
        );
    }

    #[test]
    fn test_empty_selection_message_depends_on_lock_filter() {
        let plain = CommitError::EmptySelection { locked_only: false };
        let locked = CommitError::EmptySelection { locked_only: true };

        assert_eq!(plain.user_message(), "Select at least one text layer");
        assert_eq!(
            locked.user_message(),
            "Select at least one unlocked text layer"
        );
    }
}
