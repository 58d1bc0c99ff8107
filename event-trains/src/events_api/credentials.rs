//! Credential storage for the events API.
//!
//! The client only needs "a credential is available" and "remember this
//! new credential"; where it lives is up to the [`CredentialStore`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Tokens for one logged-in phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Access token
    pub token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Phone number used to log in; required to refresh
    pub phone_number: String,
}

/// Errors from a credential store.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The backing file could not be read
    #[error("failed to read credentials from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file could not be written
    #[error("failed to write credentials to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The stored data is not a valid credential
    #[error("invalid credential file {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where the events client keeps its credential.
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential, if any.
    fn load(&self) -> Result<Option<Credential>, CredentialError>;

    /// Replace the stored credential.
    fn save(&self, credential: &Credential) -> Result<(), CredentialError>;
}

/// Credential kept as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        // Default to a file in the current directory
        Self::new("auth.json")
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, CredentialError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CredentialError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let credential = serde_json::from_str(&contents).map_err(|source| CredentialError::Format {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(credential))
    }

    fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| CredentialError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let json =
            serde_json::to_string_pretty(credential).map_err(|source| CredentialError::Format {
                path: self.path.clone(),
                source,
            })?;

        std::fs::write(&self.path, json).map_err(|source| CredentialError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Credential kept in memory (for tests).
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, CredentialError> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(credential.clone());
        Ok(())
    }
}
