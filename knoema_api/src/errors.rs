//! Error types for the API client.

use std::path::PathBuf;

use crate::types::ErrorList;

/// Errors that can occur when building requests or calling the API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The transport could not complete the round trip (connect, TLS, body read).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response decoded as JSON but a required field is absent or has the wrong shape.
    #[error("Invalid response document: {0}")]
    Validation(String),
    /// The response body is not a JSON document.
    #[error("Malformed response body: {0}")]
    MalformedResponse(String),
    /// A request body could not be serialized.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),
    /// The file to upload could not be read.
    #[error("Failed to read {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The service refused an uploaded file at the post or verify step.
    #[error("Upload rejected by the service: {}", rejection_summary(.errors.as_deref()))]
    UploadRejected { errors: Option<ErrorList> },
}

impl Error {
    /// Classifies a decode failure: a well-formed document missing data is a
    /// validation error, anything else is a malformed body.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Error::Validation(err.to_string()),
            _ => Error::MalformedResponse(err.to_string()),
        }
    }
}

/// First reported error, plus how many more follow.
fn rejection_summary(errors: Option<&[serde_json::Value]>) -> String {
    let Some((first, rest)) = errors.and_then(|e| e.split_first()) else {
        return "no details".to_string();
    };
    let first = match first {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if rest.is_empty() {
        first
    } else {
        format!("{} (and {} more)", first, rest.len())
    }
}
