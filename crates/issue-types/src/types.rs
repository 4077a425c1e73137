//! Site issue records as consumed by document generation

use serde::{Deserialize, Serialize};

/// Lifecycle state of a reported site issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    PendingReview,
    Closed,
    Merged,
}

/// A single reported site problem.
///
/// Only `description` is read by the document templates; the remaining
/// fields ride along so callers can pass upstream records through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub responsible_party: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_timestamp: Option<String>,
}

impl Issue {
    /// Create an issue with only a description, as the dashboard does for
    /// ad-hoc entries
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}
