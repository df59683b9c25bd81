//! Content categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of sample content a layer can be assigned.
///
/// String forms are stable; they are what gets persisted into document
/// metadata and shown in UI payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Name,
    JobTitle,
    Company,
    Animal,
    Color,
    City,
    Date,
    Email,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Name,
        Category::JobTitle,
        Category::Company,
        Category::Animal,
        Category::Color,
        Category::City,
        Category::Date,
        Category::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::JobTitle => "job-title",
            Category::Company => "company",
            Category::Animal => "animal",
            Category::Color => "color",
            Category::City => "city",
            Category::Date => "date",
            Category::Email => "email",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
