//! Session, OTP, and onboarding state.
//!
//! Covers the singleton keys: `userToken` and `userData` for the current
//! session, `otp-<email>` for pending one-time codes, and
//! `hasSeenOnboarding` for the first-launch carousel. The OTP is stored
//! as the bare code string; there is no delivery channel and no expiry
//! beyond deletion on successful verification.

use pocket_bazaar_core::{Email, SessionToken};

use super::RepositoryError;
use crate::models::User;
use crate::storage::{KvStore, keys};

/// Repository for session-scoped singleton keys.
pub struct SessionRepository<'a> {
    store: &'a KvStore,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: &'a KvStore) -> Self {
        Self { store }
    }

    /// The persisted session token, if signed in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn token(&self) -> Result<Option<SessionToken>, RepositoryError> {
        Ok(self.store.get(keys::USER_TOKEN).await?)
    }

    /// The persisted profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn current_user(&self) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.get(keys::USER_DATA).await?)
    }

    /// Persist a signed-in session: token plus profile mirror.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if either write fails.
    pub async fn set(&self, token: &SessionToken, user: &User) -> Result<(), RepositoryError> {
        self.store.put(keys::USER_TOKEN, token).await?;
        self.store.put(keys::USER_DATA, user).await?;
        Ok(())
    }

    /// Refresh the profile mirror without touching the token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub async fn set_current_user(&self, user: &User) -> Result<(), RepositoryError> {
        self.store.put(keys::USER_DATA, user).await?;
        Ok(())
    }

    /// Drop both session keys.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a deletion fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.delete(keys::USER_TOKEN).await?;
        self.store.delete(keys::USER_DATA).await?;
        Ok(())
    }

    /// The pending OTP code for `email`, if one was issued.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn otp(&self, email: &Email) -> Result<Option<String>, RepositoryError> {
        Ok(self.store.get(&keys::otp(email)).await?)
    }

    /// Store a freshly issued OTP code for `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub async fn set_otp(&self, email: &Email, code: &str) -> Result<(), RepositoryError> {
        self.store.put(&keys::otp(email), &code).await?;
        Ok(())
    }

    /// Delete the pending OTP for `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the deletion fails.
    pub async fn delete_otp(&self, email: &Email) -> Result<(), RepositoryError> {
        self.store.delete(&keys::otp(email)).await?;
        Ok(())
    }

    /// Whether the onboarding carousel has been dismissed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn has_seen_onboarding(&self) -> Result<bool, RepositoryError> {
        Ok(self
            .store
            .get(keys::HAS_SEEN_ONBOARDING)
            .await?
            .unwrap_or(false))
    }

    /// Mark the onboarding carousel as dismissed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub async fn mark_onboarding_seen(&self) -> Result<(), RepositoryError> {
        self.store.put(keys::HAS_SEEN_ONBOARDING, &true).await?;
        Ok(())
    }
}
