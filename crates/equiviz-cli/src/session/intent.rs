//! Typed user intents
//!
//! Views never call the API themselves. They build an [`Intent`] and hand it to
//! [`SessionController::handle`](super::SessionController::handle), the only
//! place that mutates session state.

use crate::views::collection::ConfirmedDeletion;
use crate::views::upload::UploadRequest;
use equiviz_common::types::{DatasetId, DatasetSummary};
use std::fmt;
use std::path::PathBuf;

/// Something the user asked for
#[derive(Clone, PartialEq)]
pub enum Intent {
    Login { username: String, password: String },
    Logout,
    Reload,
    Upload(UploadRequest),
    Select(DatasetId),
    ClearSelection,
    Delete(ConfirmedDeletion),
    DownloadReport { id: DatasetId, destination: Option<PathBuf> },
    DismissBanner,
}

// Keeps the password out of logs
impl fmt::Debug for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .finish_non_exhaustive(),
            Intent::Logout => f.write_str("Logout"),
            Intent::Reload => f.write_str("Reload"),
            Intent::Upload(request) => f.debug_tuple("Upload").field(request).finish(),
            Intent::Select(id) => f.debug_tuple("Select").field(id).finish(),
            Intent::ClearSelection => f.write_str("ClearSelection"),
            Intent::Delete(deletion) => f.debug_tuple("Delete").field(&deletion.id()).finish(),
            Intent::DownloadReport { id, destination } => f
                .debug_struct("DownloadReport")
                .field("id", id)
                .field("destination", destination)
                .finish(),
            Intent::DismissBanner => f.write_str("DismissBanner"),
        }
    }
}

/// What handling an intent produced, beyond the state change itself
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done,
    Uploaded(DatasetSummary),
    ReportSaved { path: PathBuf, bytes: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_debug_hides_password() {
        let intent = Intent::Login {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", intent);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
