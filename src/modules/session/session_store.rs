//! Bearer token persistence
//!
//! The token lives under a fixed key ([`AUTH_TOKEN_KEY`]) so that several
//! processes sharing the same session file observe each other's login and
//! logout (last writer wins).

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::error::{AppError, Result};
use crate::shared::constants::AUTH_TOKEN_KEY;

/// Durable storage for the current session token
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current token, if any
    async fn token(&self) -> Option<String>;

    async fn set_token(&self, token: &str) -> Result<()>;

    /// Remove the token. Succeeds when there is nothing to remove.
    async fn clear(&self) -> Result<()>;
}

/// In-memory store, used by tests and one-shot commands
#[derive(Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn token(&self) -> Option<String> {
        self.token.read().clone().filter(|t| !t.is_empty())
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}

/// JSON file store: `{ "auth_token": "<token>" }`
///
/// Unrelated keys already present in the file are preserved.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_entries(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(AppError::Session(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                warn!(
                    "Session file {} is corrupt, treating as empty",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    async fn write_entries(&self, entries: Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Session(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let body = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| AppError::Session(format!("Failed to encode session: {}", e)))?;

        tokio::fs::write(&self.path, body).await.map_err(|e| {
            AppError::Session(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn token(&self) -> Option<String> {
        match self.read_entries().await {
            Ok(entries) => entries
                .get(AUTH_TOKEN_KEY)
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            Err(e) => {
                warn!("Could not read session token: {}", e);
                None
            }
        }
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(AUTH_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(entries).await?;
        debug!("Session token stored in {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries().await?;
        if entries.remove(AUTH_TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(entries).await?;
        debug!("Session token removed from {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.token().await, None);

        store.set_token("abc").await.unwrap();
        assert_eq!(store.token().await.as_deref(), Some("abc"));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn test_empty_token_reads_as_none_in_both_stores() {
        let memory = MemorySessionStore::with_token("");
        assert_eq!(memory.token().await, None);

        let dir = tempfile::tempdir().unwrap();
        let file = FileSessionStore::new(dir.path().join("session.json"));
        file.set_token("").await.unwrap();
        assert_eq!(file.token().await, None);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path).set_token("tok-1").await.unwrap();

        let other = FileSessionStore::new(&path);
        assert_eq!(other.token().await.as_deref(), Some("tok-1"));

        other.clear().await.unwrap();
        assert_eq!(FileSessionStore::new(&path).token().await, None);
    }

    #[tokio::test]
    async fn test_file_store_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.set_token("tok").await.unwrap();
        store.clear().await.unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert!(raw.get(AUTH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_file_store_missing_or_corrupt_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        assert_eq!(store.token().await, None);
        store.clear().await.unwrap();
        assert!(!path.exists());

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(store.token().await, None);
    }
}
