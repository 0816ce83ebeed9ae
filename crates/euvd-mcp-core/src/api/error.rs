//! Client error types

use thiserror::Error;

/// Faults the client cannot classify as an HTTP or transport failure
///
/// These are not turned into error envelopes; they fail the invocation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request itself could not be built (bad URL, bad header)
    #[error("Invalid request to {path}: {source}")]
    InvalidRequest {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response whose body is not JSON
    #[error("Malformed response from {path} (status {status}): {source}")]
    MalformedBody {
        path: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;
