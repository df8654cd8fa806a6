//! errors.rs - Custom error types for the mongosan-core library.
//!
//! The sanitization engine itself is total and never returns an error. The
//! variants below cover the plumbing around it: the optional depth guard,
//! configuration loading and JSON decoding.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `mongosan-core` library.
///
/// New variants may be added in future versions, hence `#[non_exhaustive]`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MongosanError {
    #[error("Input nesting exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Input is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to parse sanitizer configuration: {0}")]
    ConfigParse(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
