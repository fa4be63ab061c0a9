//! Error types for the Equiviz CLI
//!
//! Three failure families matter to the session contract:
//!
//! - [`CliError::Auth`]: the login probe was rejected. Never changes session state.
//! - [`CliError::Validation`]: a local upload precondition failed. No request was sent.
//! - [`CliError::Request`]: any other non-2xx or network failure from the API client.
//!
//! Everything else is ambient plumbing (I/O, config, prompts).

use std::fmt;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Backend operation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListDatasets,
    GetDataset,
    GetAnalytics,
    ListEquipment,
    Upload,
    Delete,
    DownloadReport,
}

impl Operation {
    /// Message used when the backend did not supply one
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::ListDatasets => "Could not fetch datasets",
            Operation::GetDataset => "Could not fetch dataset details",
            Operation::GetAnalytics => "Could not fetch dataset analytics",
            Operation::ListEquipment => "Could not fetch equipment records",
            Operation::Upload => "Upload failed",
            Operation::Delete => "Could not delete dataset",
            Operation::DownloadReport => "Could not download report",
        }
    }

    /// Fixed text of the dismissible error banner
    pub fn banner_message(self) -> &'static str {
        match self {
            Operation::ListDatasets => "Failed to load datasets",
            Operation::GetDataset | Operation::GetAnalytics => "Failed to load analytics",
            Operation::ListEquipment => "Failed to load equipment records",
            Operation::Upload => "Upload failed",
            Operation::Delete => "Failed to delete dataset",
            Operation::DownloadReport => "Failed to download report",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListDatasets => "list_datasets",
            Operation::GetDataset => "get_dataset",
            Operation::GetAnalytics => "get_analytics",
            Operation::ListEquipment => "list_equipment",
            Operation::Upload => "upload",
            Operation::Delete => "delete",
            Operation::DownloadReport => "download_report",
        };
        f.write_str(name)
    }
}

/// Local upload precondition failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a dataset name")]
    EmptyName,

    #[error("Please select a CSV file")]
    MissingFile,

    #[error("Please upload a CSV file ('{0}' does not end in .csv)")]
    NotCsv(String),
}

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Login probe rejected or unreachable
    #[error("Login failed: {0}")]
    Auth(String),

    /// Upload form failed local checks
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend request failed
    #[error("{message}")]
    Request {
        operation: Operation,
        status: Option<u16>,
        message: String,
    },

    /// Dataset id is not in the current list
    #[error("Dataset {0} not found. Run 'equiviz datasets' to see available datasets.")]
    DatasetNotFound(equiviz_common::types::DatasetId),

    /// Persisted credentials could not be read or written
    #[error("Credential store error: {0}. Run 'equiviz logout' to reset the stored session.")]
    CredentialStore(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or command-line flags.")]
    Config(String),

    /// Interactive prompt failed or was cancelled
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("Failed to render JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Dataset id or credential parsing failed
    #[error(transparent)]
    Common(#[from] equiviz_common::CommonError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a request failure
    pub fn request(operation: Operation, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Request {
            operation,
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a credential store error
    pub fn credential_store(msg: impl Into<String>) -> Self {
        Self::CredentialStore(msg.into())
    }

    /// The backend operation, for request failures
    pub fn operation(&self) -> Option<Operation> {
        match self {
            CliError::Request { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

impl From<inquire::InquireError> for CliError {
    fn from(err: inquire::InquireError) -> Self {
        Self::Prompt(err.to_string())
    }
}
