//! Read models returned by the API, plus the helpers they share.
//!
//! Every read model is built once from a JSON document with [`parse`] and is
//! not mutated afterwards.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

mod meta;
pub use self::meta::{DateRange, Dataset, Dimension, DimensionMember, DimensionModel};

mod pivot;
pub use self::pivot::{PivotItem, PivotResponse};

mod upload;
pub use self::upload::{
    DatasetUploadResponse, DatasetUploadStatusResponse, DatasetVerifyResponse, FileProperties,
    UploadDatasetDetails, UploadPostResponse, UploadVerifyResponse,
};

/// Error entries reported by the upload and verification endpoints.
pub type ErrorList = Vec<serde_json::Value>;

/// Decodes a response body into a read model.
///
/// A body that is not JSON yields [`Error::MalformedResponse`]; a JSON
/// document that lacks a required field yields [`Error::Validation`].
pub fn parse<T: DeserializeOwned>(body: impl AsRef<[u8]>) -> Result<T, Error> {
    serde_json::from_slice(body.as_ref()).map_err(Error::from_decode)
}

/// Compares two optional strings ignoring case.
///
/// Two present, non-empty strings are equal when their upper-case forms
/// match. Otherwise the values are equal only if both are absent or empty.
pub fn eq_ignore_case(first: Option<&str>, second: Option<&str>) -> bool {
    let first = first.filter(|s| !s.is_empty());
    let second = second.filter(|s| !s.is_empty());
    match (first, second) {
        (Some(a), Some(b)) => a.to_uppercase() == b.to_uppercase(),
        (None, None) => true,
        _ => false,
    }
}

/// Key of a dimension or member as the service delivers it: numeric or text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Int(v)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Text(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Text(v)
    }
}

/// Deserializes a field that must be present but may be `null`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
