//! Error types for fetching, validating and writing reports.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to the user when the API cannot be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "network error, check the connection and try again";

/// Failure to fetch a record list from the API. Always fatal for the run.
///
/// Serializable so that cassettes can record and replay failed fetches with
/// their kind intact.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// The endpoint could not be reached (connect failure or transport timeout).
    #[error("{message}: {cause}")]
    Network {
        /// User-facing description.
        message: String,
        /// Underlying transport error text.
        cause: String,
    },

    /// The endpoint answered with something other than `200 OK`.
    #[error("request failed with status code {status}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The body was not a JSON array of records.
    #[error("failed to decode response from {url}: {cause}")]
    Decode {
        /// The URL that was fetched.
        url: String,
        /// Why decoding failed.
        cause: String,
    },

    /// Any other failure while issuing the request.
    #[error("request to {url} failed: {cause}")]
    Other {
        /// The URL that was fetched.
        url: String,
        /// Underlying error text.
        cause: String,
    },
}

impl FetchError {
    /// Builds a [`FetchError::Network`] with the standard user-facing message.
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::Network { message: NETWORK_ERROR_MESSAGE.to_string(), cause: cause.to_string() }
    }
}

/// A user or task record that cannot be used. Recovered by skipping the record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The record is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// A required field is absent or null.
    #[error("missing field '{field}'")]
    MissingField {
        /// Dotted path of the missing field.
        field: &'static str,
    },

    /// A field is present but has the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable expected type.
        expected: &'static str,
    },

    /// The username cannot be used as a report file name.
    #[error("username '{0}' cannot be used as a file name")]
    UnsafeUsername(String),
}

/// Failure to persist a report.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The previous report could not be moved aside.
    #[error("failed to rotate {} -> {}: {source}", .from.display(), .to.display())]
    Rotate {
        /// Existing report path.
        from: PathBuf,
        /// Rotated report path.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The new report could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Report path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Fatal failure that aborts a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// One of the two datasets could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The output directory could not be prepared.
    #[error(transparent)]
    OutputDir(#[from] WriteError),
}
