//! Upload flow
//!
//! Local checks run before anything touches the network:
//! - the file must end in `.csv`, checked when it is picked or dropped
//! - the name must be non-empty after trimming, checked on submit
//! - a file must be present, checked on submit
//!
//! On success the form clears itself; on failure it keeps its fields and
//! records the message so the user can correct and resubmit.

use crate::error::{CliError, Result, ValidationError};
use crate::session::Outcome;
use std::path::{Path, PathBuf};

/// Extension the backend accepts
pub const CSV_SUFFIX: &str = ".csv";

/// A file accepted by the picker or drop zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedFile {
    fn accept(path: &Path) -> std::result::Result<Self, ValidationError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !file_name.ends_with(CSV_SUFFIX) {
            return Err(ValidationError::NotCsv(file_name));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }
}

/// Validated upload, ready for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Name as entered
    pub name: String,
    pub file: SelectedFile,
}

/// Local state of the upload form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    name: String,
    file: Option<SelectedFile>,
    error: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// File chosen through the picker. A rejected file leaves the previous one in place.
    pub fn pick_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), ValidationError> {
        self.accept_file(path.as_ref())
    }

    /// File dropped onto the form; same rule as the picker
    pub fn drop_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), ValidationError> {
        self.accept_file(path.as_ref())
    }

    pub fn remove_file(&mut self) {
        self.file = None;
    }

    fn accept_file(&mut self, path: &Path) -> std::result::Result<(), ValidationError> {
        match SelectedFile::accept(path) {
            Ok(file) => {
                self.file = Some(file);
                self.error = None;
                Ok(())
            },
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Check name and file presence and build the request
    pub fn submit(&mut self) -> std::result::Result<UploadRequest, ValidationError> {
        let checked = if self.name.trim().is_empty() {
            Err(ValidationError::EmptyName)
        } else {
            self.file.clone().ok_or(ValidationError::MissingFile)
        };

        match checked {
            Ok(file) => {
                self.error = None;
                Ok(UploadRequest {
                    name: self.name.clone(),
                    file,
                })
            },
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Record how the upload went: clear on success, keep fields on failure
    pub fn complete(&mut self, result: &Result<Outcome>) {
        match result {
            Ok(_) => *self = Self::default(),
            Err(CliError::Request { message, .. }) => self.error = Some(message.clone()),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
