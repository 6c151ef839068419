//! Error types for the datastore client.

use thiserror::Error;

/// Errors that can occur when talking to the datastore service.
#[derive(Error, Debug)]
pub enum DatastoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Datastore returned an error response
    #[error("Datastore error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Invalid datastore base URL
    #[error("Invalid datastore URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a datastore response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A record body could not be serialized into a JSON object
    #[error("Record is not a JSON object: {0}")]
    InvalidRecord(String),

    /// Datastore is offline or unreachable
    #[error("Datastore unreachable: {0}")]
    Unreachable(String),
}

/// Result type for datastore operations.
pub type Result<T> = std::result::Result<T, DatastoreError>;
