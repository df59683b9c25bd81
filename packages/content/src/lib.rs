//! # Specimen Content
//!
//! The text-generation oracle: given a content category, produce a
//! plausible sample string. The categories are a closed set; the pools
//! behind them are swappable data behind the single [`Generator`] seam.

pub mod category;
pub mod generate;
mod pools;

pub use category::*;
pub use generate::*;
