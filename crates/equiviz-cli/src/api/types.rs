//! API request and response types
//!
//! Domain payloads live in `equiviz_common::types`; this module holds the
//! envelopes and error bodies specific to the HTTP layer.

use equiviz_common::types::DatasetSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List endpoint response: bare array, or paginated `{"results": [...]}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DatasetListResponse {
    Plain(Vec<DatasetSummary>),
    Paginated { results: Vec<DatasetSummary> },
}

impl DatasetListResponse {
    pub fn into_datasets(self) -> Vec<DatasetSummary> {
        match self {
            DatasetListResponse::Plain(datasets) => datasets,
            DatasetListResponse::Paginated { results, .. } => results,
        }
    }
}

/// Body returned by a delete; the backend may send nothing at all
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A downloaded PDF report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    /// File name suggested by the server, if any
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Pull a human-readable message out of an error body.
///
/// Tries `error`, then `detail`, then the first message of any field-error
/// list (`{"file": ["Only CSV files are allowed."]}`).
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["error", "detail"] {
        if let Some(message) = object.get(key).and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return Some(message.to_string());
            }
        }
    }

    object
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .find_map(|v| v.as_str().map(str::to_string))
}

/// File name from a `Content-Disposition: attachment; filename="..."` header
pub fn attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
