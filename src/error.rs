// Error taxonomy shared by the library modules.
//
// Per-item failures never abort a run: the session turns them into
// outcomes and counts them. Only `ConfigError` and a transport that cannot
// be built stop the program before the first item.

use std::path::PathBuf;
use thiserror::Error;

/// Raised by the upload client when no usable response came back.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server returned an empty response")]
    EmptyResponse,
}

/// Local precondition failures found before an item is uploaded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("does not exist or is not a regular file")]
    InvalidInput,

    #[error("exceeds {limit} bytes (size is {actual})")]
    TooLarge { actual: u64, limit: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}
