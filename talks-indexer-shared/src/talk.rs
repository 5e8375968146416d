//! Talk record and its index projections.
//!
//! A talk carries two open field maps: `data`, which is safe to publish, and
//! `private_data`, which is for the program committee only. The private index
//! receives every talk with both maps merged; the public index receives only
//! approved talks, with the private map dropped.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::FieldMap;

/// Lifecycle state of a talk as reported by the talk source.
///
/// Parsing is exact and case-sensitive. Values that are not recognised are
/// preserved verbatim in [`TalkStatus::Other`] so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TalkStatus {
    Submitted,
    Approved,
    Rejected,
    Draft,
    Historic,
    Other(String),
}

impl TalkStatus {
    /// The string form used by the talk source and stored in the indexes.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Draft => "DRAFT",
            Self::Historic => "HISTORIC",
            Self::Other(s) => s,
        }
    }

    /// Whether talks in this state may appear in the public index.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl From<String> for TalkStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUBMITTED" => Self::Submitted,
            "APPROVED" => Self::Approved,
            "REJECTED" => Self::Rejected,
            "DRAFT" => Self::Draft,
            "HISTORIC" => Self::Historic,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TalkStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TalkStatus> for String {
    fn from(status: TalkStatus) -> Self {
        match status {
            TalkStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TalkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A speaker attached to a talk. `data` only holds public-safe attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: FieldMap,
}

/// A conference talk as fetched from the talk source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    /// Source identifier, also used as the search document id.
    pub id: String,
    pub conference_id: String,
    #[serde(default)]
    pub conference_slug: String,
    #[serde(default)]
    pub conference_name: String,
    pub status: TalkStatus,
    /// Public-safe fields (title, abstract, schedule, ...).
    #[serde(default)]
    pub data: FieldMap,
    /// Committee-only fields (submitter, feedback, internal notes, ...).
    #[serde(default, skip_serializing_if = "FieldMap::is_empty")]
    pub private_data: FieldMap,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Talk {
    /// Create a talk with empty data maps and no speakers.
    pub fn new(
        id: impl Into<String>,
        conference_id: impl Into<String>,
        status: impl Into<TalkStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            conference_id: conference_id.into(),
            conference_slug: String::new(),
            conference_name: String::new(),
            status: status.into(),
            data: FieldMap::new(),
            private_data: FieldMap::new(),
            speakers: Vec::new(),
            created: None,
            last_updated: None,
        }
    }

    /// Whether this talk may appear in the public index.
    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    /// Projection for the private index.
    ///
    /// `private_data` is merged into `data`, overwriting on key collision,
    /// and then cleared.
    pub fn to_private(&self) -> Talk {
        let mut talk = self.clone();
        let private_data = std::mem::take(&mut talk.private_data);
        talk.data.extend(private_data);
        talk
    }

    /// Projection for the public index, or `None` if the talk is not public.
    pub fn to_public(&self) -> Option<Talk> {
        if !self.is_public() {
            return None;
        }

        Some(Talk {
            private_data: FieldMap::new(),
            ..self.clone()
        })
    }
}
