//! Client-side session marker.
//!
//! A small key-value slot map holding the signed-in profile between page
//! loads. Either kept in memory or mirrored to a JSON file.

use crate::error::SessionError;
use crate::types::AccountProfile;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Slot holding the serialized profile of the signed-in user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Process-wide key-value store for the session marker.
#[derive(Clone)]
pub struct SessionStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Store that lives only as long as the process.
    pub fn memory() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// Store mirrored to `path`, loading whatever a previous run left there.
    ///
    /// A missing or unreadable file starts an empty store.
    pub async fn open(path: PathBuf) -> Result<Self, SessionError> {
        let slots = if fs::try_exists(&path).await? {
            let data = fs::read(&path).await?;
            match serde_json::from_slice::<HashMap<String, String>>(&data) {
                Ok(slots) => {
                    info!("Loaded {} session slots from {:?}", slots.len(), path);
                    slots
                }
                Err(e) => {
                    warn!("Session file {:?} is corrupt, starting empty: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            debug!("Session file {:?} not found, starting empty", path);
            HashMap::new()
        };

        Ok(Self {
            slots: Arc::new(RwLock::new(slots)),
            path: Some(path),
        })
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.slots.read().await.get(key).cloned()
    }

    #[instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), value);
        self.persist(&slots).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<bool, SessionError> {
        let mut slots = self.slots.write().await;
        let removed = slots.remove(key).is_some();
        if removed {
            self.persist(&slots).await?;
        }
        Ok(removed)
    }

    /// Record `profile` as the signed-in user.
    pub async fn save_profile(&self, profile: &AccountProfile) -> Result<(), SessionError> {
        let json = serde_json::to_string(profile)?;
        self.set(CURRENT_USER_KEY, json).await
    }

    /// Profile of the signed-in user, if any.
    pub async fn current_user(&self) -> Result<Option<AccountProfile>, SessionError> {
        match self.get(CURRENT_USER_KEY).await {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Forget the signed-in user.
    pub async fn clear(&self) -> Result<bool, SessionError> {
        self.remove(CURRENT_USER_KEY).await
    }

    async fn persist(&self, slots: &HashMap<String, String>) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let data = serde_json::to_vec(slots)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, path).await?;

        debug!("Saved {} session slots to {:?}", slots.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AccountProfile {
        AccountProfile {
            name: "Ana Rojas".into(),
            national_id: "12345678-5".into(),
            program: "Civil Engineering".into(),
            phone: "+56912345678".into(),
            email: "ana@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = SessionStore::memory();
        assert!(store.current_user().await.unwrap().is_none());

        store.save_profile(&profile()).await.unwrap();
        assert_eq!(store.current_user().await.unwrap(), Some(profile()));

        assert!(store.clear().await.unwrap());
        assert!(store.current_user().await.unwrap().is_none());
        assert!(!store.clear().await.unwrap());
    }

    #[tokio::test]
    async fn test_marker_is_json_under_fixed_key() {
        let store = SessionStore::memory();
        store.save_profile(&profile()).await.unwrap();

        let raw = store.get(CURRENT_USER_KEY).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["email"], "ana@example.com");
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::open(path.clone()).await.unwrap();
        store.save_profile(&profile()).await.unwrap();

        let reopened = SessionStore::open(path).await.unwrap();
        assert_eq!(reopened.current_user().await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = SessionStore::open(path).await.unwrap();
        assert!(store.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_slots() {
        let store = SessionStore::memory();
        let other = store.clone();
        store.set("k", "v".into()).await.unwrap();
        assert_eq!(other.get("k").await.as_deref(), Some("v"));
    }
}
