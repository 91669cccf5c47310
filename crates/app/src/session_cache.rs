//! Local key-value cache for the signed-in user's session.
//!
//! Values are strings stored in one JSON object on disk. The profile lives
//! under [`USER_DATA_KEY`] as serialized [`UserProfile`] JSON, the same
//! shape the sign-in flow writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cinemawala_core::profile::UserProfile;

/// Key the cached profile is stored under.
pub const USER_DATA_KEY: &str = "userData";

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Session cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session cache is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed string map.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.read_all().await?.remove(key))
    }

    pub async fn set_item(&self, key: &str, value: impl Into<String>) -> Result<(), CacheError> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.into());
        self.write_all(&entries).await
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
        }
        Ok(())
    }

    /// The cached profile. An entry that does not parse as a profile is
    /// treated as signed out.
    pub async fn load_profile(&self) -> Result<Option<UserProfile>, CacheError> {
        let Some(raw) = self.get_item(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable cached profile");
                Ok(None)
            }
        }
    }

    pub async fn store_profile(&self, profile: &UserProfile) -> Result<(), CacheError> {
        self.set_item(USER_DATA_KEY, serde_json::to_string(profile)?)
            .await
    }

    /// Sign out locally.
    pub async fn clear_profile(&self) -> Result<(), CacheError> {
        self.remove_item(USER_DATA_KEY).await
    }

    // ---- private helpers ----

    async fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a sibling temp file so a crash never leaves a
    /// truncated cache behind.
    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
