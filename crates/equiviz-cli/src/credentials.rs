//! Persistent credential store
//!
//! Holds the encoded Basic credentials and the plain username between runs.
//! Values are opaque: nothing here checks that the credentials are valid.
//! Presence of the encoded value is what "authenticated" means.

use crate::error::{CliError, Result};
use equiviz_common::auth::BasicCredentials;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// File name of the persisted session inside the state directory
pub const CREDENTIALS_FILE: &str = "credentials.toml";

/// Storage for the current user's credentials
pub trait CredentialStore: Send + Sync {
    /// Persist credentials, replacing any previous pair
    fn save(&self, username: &str, credentials: &BasicCredentials) -> Result<()>;

    /// Remove stored credentials. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;

    /// Stored encoded credentials, if any
    fn credentials(&self) -> Option<BasicCredentials>;

    /// Stored username, if any
    fn username(&self) -> Option<String>;

    fn is_present(&self) -> bool {
        self.credentials().is_some()
    }
}

/// On-disk layout, keyed by fixed names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct StoredSession {
    credentials: String,
    #[serde(default)]
    username: Option<String>,
}

/// Credential store backed by `credentials.toml` in the state directory
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store rooted at `state_dir`
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(CREDENTIALS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Option<StoredSession> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read credential store");
                return None;
            },
        };

        match toml::from_str::<StoredSession>(&content) {
            Ok(session) if !session.credentials.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed credential store");
                None
            },
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, username: &str, credentials: &BasicCredentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let session = StoredSession {
            credentials: credentials.as_str().to_string(),
            username: Some(username.to_string()),
        };
        let content = toml::to_string(&session)
            .map_err(|e| CliError::credential_store(format!("Failed to encode session: {}", e)))?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies on create; tighten a file left by an older run
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(content.as_bytes())?;

        debug!(path = %self.path.display(), username = %username, "Credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Credentials cleared");
                Ok(())
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn credentials(&self) -> Option<BasicCredentials> {
        self.load().map(|s| BasicCredentials::from_encoded(s.credentials))
    }

    fn username(&self) -> Option<String> {
        let session = self.load()?;
        // Older files may lack the username key; recover it from the pair.
        session
            .username
            .or_else(|| BasicCredentials::from_encoded(session.credentials).username().ok())
    }
}

/// In-process store, for tests and embedding
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<(String, BasicCredentials)>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session
    pub fn with_session(username: &str, credentials: BasicCredentials) -> Self {
        Self {
            inner: Mutex::new(Some((username.to_string(), credentials))),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(String, BasicCredentials)>> {
        // A poisoned lock still holds consistent data: every write is a single assignment.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, username: &str, credentials: &BasicCredentials) -> Result<()> {
        *self.lock() = Some((username.to_string(), credentials.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }

    fn credentials(&self) -> Option<BasicCredentials> {
        self.lock().as_ref().map(|(_, c)| c.clone())
    }

    fn username(&self) -> Option<String> {
        self.lock().as_ref().map(|(u, _)| u.clone())
    }
}
