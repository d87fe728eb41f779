//! Flat JSON key-value storage.
//!
//! Every persisted record in the storefront is a single JSON value under a
//! fixed key name (see [`keys`]). The store is a directory with one file
//! per key; reads and writes go through `tokio::fs`. There is no locking
//! and no transaction support: this is a single-user, single-device client
//! and the simplest model that fits it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// The fixed key names of every persisted record.
///
/// Key shapes are part of the external interface: an existing data
/// directory written by an earlier build must keep loading.
pub mod keys {
    use pocket_bazaar_core::{Email, UserId};

    /// Current session token.
    pub const USER_TOKEN: &str = "userToken";
    /// Profile of the currently signed-in user.
    pub const USER_DATA: &str = "userData";
    /// Array of all registered users.
    pub const USERS: &str = "users";
    /// Whether the onboarding carousel has been dismissed.
    pub const HAS_SEEN_ONBOARDING: &str = "hasSeenOnboarding";

    /// Per-user cart key.
    #[must_use]
    pub fn cart(user_id: &UserId) -> String {
        format!("cart-{user_id}")
    }

    /// Per-user order list key.
    #[must_use]
    pub fn orders(user_id: &UserId) -> String {
        format!("orders-{user_id}")
    }

    /// Pending OTP key, derived from the email it was issued for.
    #[must_use]
    pub fn otp(email: &Email) -> String {
        format!("otp-{email}")
    }
}

/// Errors that can occur in the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized to JSON.
    #[error("failed to encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    /// A stored value could not be parsed back.
    #[error("corrupt value under key {key:?}: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

/// A directory-backed JSON key-value store.
///
/// One file per key, written atomically via a temp file and rename so a
/// crash mid-write never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on read failure and
    /// `StorageError::Decode` when the stored JSON does not parse as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
            key: key.to_owned(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Encode `value` and write it under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if serialization fails and
    /// `StorageError::Io` on write failure.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key, bytes = bytes.len(), "kv write");
        Ok(())
    }

    /// Remove the value under `key`.
    ///
    /// Returns `true` if a value existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on deletion failure.
    pub async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {
                debug!(key, "kv delete");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a value exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the existence check fails.
    pub async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        match tokio::fs::try_exists(self.path_for(key)).await {
            Ok(exists) => Ok(exists),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }

    /// The directory this store reads and writes.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Map a key to a safe file name.
///
/// Keys can embed user input (`otp-<email>`), so anything outside a
/// conservative character set becomes `_`. Distinct emails that collide
/// after sanitization would share a file, which is acceptable for a
/// single-user client.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '@' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        name: String,
        count: u32,
    }

    async fn scratch_store() -> (tempfile::TempDir, KvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let (_dir, store) = scratch_store().await;
        let got: Option<Blob> = store.get("nothing").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (_dir, store) = scratch_store().await;
        let blob = Blob {
            name: "cart".to_owned(),
            count: 3,
        };
        store.put("cart-1", &blob).await.unwrap();

        let got: Blob = store.get("cart-1").await.unwrap().unwrap();
        assert_eq!(got, blob);
    }

    #[tokio::test]
    async fn test_put_replaces_prior_value() {
        let (_dir, store) = scratch_store().await;
        store.put("k", &1u32).await.unwrap();
        store.put("k", &2u32).await.unwrap();
        assert_eq!(store.get::<u32>("k").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = scratch_store().await;
        store.put("k", &true).await.unwrap();
        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert_eq!(store.get::<bool>("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_decode_error_on_type_mismatch() {
        let (_dir, store) = scratch_store().await;
        store.put("k", &"text").await.unwrap();
        let got = store.get::<u32>("k").await;
        assert!(matches!(got, Err(StorageError::Decode { .. })));
    }

    #[test]
    fn test_sanitize_key_keeps_fixed_keys_intact() {
        assert_eq!(sanitize_key("userToken"), "userToken");
        assert_eq!(sanitize_key("cart-42"), "cart-42");
        assert_eq!(
            sanitize_key("otp-jane@example.com"),
            "otp-jane@example.com"
        );
    }

    #[test]
    fn test_sanitize_key_replaces_path_separators() {
        assert_eq!(sanitize_key("otp-a/b@c.com"), "otp-a_b@c.com");
    }
}
