//! Persisted session credentials.
//!
//! The bearer token (and a cached copy of the profile) lives in
//! `~/.sebrae/credentials.toml` so sessions survive across invocations.
//! Loading is tolerant: a missing or malformed
//! file means "not logged in", never a hard error. Saving and clearing
//! are explicit, performed on login, logout, and 401.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sebrae_types::user::UserProfile;

/// Errors from writing or removing the credential file.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Contents of the credential file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// File-backed credential store.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the default location, `~/.sebrae/credentials.toml`.
    pub fn default_location() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: home.join(".sebrae").join("credentials.toml"),
        }
    }

    /// Store at an explicit path (tests, `SEBRAE_HOME` overrides).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load credentials, or `None` when absent or unreadable.
    pub async fn load(&self) -> Option<Credentials> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("failed to read {}: {err}", self.path.display());
                return None;
            }
        };

        match toml::from_str::<Credentials>(&content) {
            Ok(creds) => Some(creds),
            Err(err) => {
                tracing::warn!("failed to parse {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Persist credentials, creating the parent directory as needed.
    pub async fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(credentials)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Remove the credential file. Already-absent is not an error.
    pub async fn clear(&self) -> Result<(), CredentialError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
