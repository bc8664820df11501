//! Error type returned by the accessors and the store

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure, unreadable body or malformed URL
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON shape the caller asked for
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode { .. })
    }
}
