//! Pivot query results.

use serde::{Deserialize, Serialize};

use super::Key;

/// Selection of members along one dimension axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotItem {
    pub dimension_id: String,
    pub members: Vec<Key>,
}

impl PivotItem {
    pub fn new(dimension_id: &str, members: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        Self {
            dimension_id: dimension_id.to_string(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response of `/api/1.0/data/pivot/`.
///
/// The axes echo the request; `tuples` is the raw `data` array and is left
/// for the caller to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotResponse {
    pub dataset: String,
    pub header: Vec<PivotItem>,
    pub stub: Vec<PivotItem>,
    pub filter: Vec<PivotItem>,
    #[serde(rename = "data")]
    pub tuples: Vec<serde_json::Value>,
}

impl PivotResponse {
    /// Every axis item, header first, then stub, then filter.
    pub fn axes(&self) -> impl Iterator<Item = &PivotItem> {
        self.header.iter().chain(&self.stub).chain(&self.filter)
    }
}
