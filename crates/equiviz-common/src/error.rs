//! Error types for Equiviz shared code

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Main error type for the common crate
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommonError {
    #[error("Invalid dataset id '{0}': expected a positive integer")]
    InvalidDatasetId(String),

    #[error("Malformed credentials: {0}")]
    MalformedCredentials(String),
}
