//! Shared request infrastructure: the [`Query`] and [`JsonRequest`] traits.

use serde::Serialize;
use url::Url;

use crate::Error;

/// Trait implemented by query-string builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Write models sent as a JSON request body.
pub trait JsonRequest: Serialize {
    /// Serializes the request body.
    fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| {
            tracing::error!("Failed to serialize request body: {}", e);
            Error::Serialization(e.to_string())
        })
    }
}
