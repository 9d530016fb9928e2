//! Credential Storage
//! Mission: Read-only username lookup behind a swappable trait

use crate::auth::models::Credential;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Lookup capability the login flow depends on.
///
/// Implementations are shared across requests and must tolerate concurrent
/// readers.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, username: &str) -> Option<Credential>;
}

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("failed to read credentials file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse credentials file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// In-memory credential table, immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        let users = credentials
            .into_iter()
            .map(|c| (c.username.clone(), c))
            .collect();
        Self { users }
    }

    /// Built-in table used when no credentials file is configured.
    pub fn builtin() -> Self {
        Self::new([
            Credential::new("aditira", "password1", "admin"),
            Credential::new("dito", "password2", "student"),
        ])
    }

    /// Load a TOML table of the form:
    ///
    /// ```toml
    /// [users.aditira]
    /// password = "password1"
    /// role = "admin"
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        let file: CredentialsFile = toml::from_str(raw)?;
        Ok(Self::new(file.users.into_iter().map(|(username, entry)| {
            Credential::new(username, entry.password, entry.role)
        })))
    }

    pub fn from_file(path: &Path) -> Result<Self, CredentialStoreError> {
        let path_str = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialStoreError::Read {
            path: path_str.clone(),
            source,
        })?;
        let store = Self::from_toml_str(&raw).map_err(|source| CredentialStoreError::Parse {
            path: path_str.clone(),
            source,
        })?;

        info!("🔐 Loaded {} credentials from {}", store.len(), path_str);
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup(&self, username: &str) -> Option<Credential> {
        self.users.get(username).cloned()
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    users: HashMap<String, CredentialEntry>,
}

#[derive(Debug, Deserialize)]
struct CredentialEntry {
    password: String,
    role: String,
}
