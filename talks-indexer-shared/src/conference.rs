//! Conference record.

use serde::{Deserialize, Serialize};

/// A conference as known to the talk source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    /// Source identifier, used to fetch the conference's talks.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-safe identifier used for conference-scoped reindexing.
    pub slug: String,
}

impl Conference {
    /// Create a new conference record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}
