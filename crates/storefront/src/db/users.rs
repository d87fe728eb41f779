//! Registered-users repository.
//!
//! The whole user list persists as one JSON array under the `users` key;
//! every lookup is a linear scan over that array. Fine at this scale, and
//! exactly how the client it replaces behaved.

use pocket_bazaar_core::{Email, Phone, UserId};

use super::RepositoryError;
use crate::models::User;
use crate::storage::{KvStore, keys};

/// Repository for the registered-users list.
pub struct UserRepository<'a> {
    store: &'a KvStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a KvStore) -> Self {
        Self { store }
    }

    /// All registered users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.get(keys::USERS).await?.unwrap_or_default())
    }

    /// Scan for a user by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.all().await?.into_iter().find(|u| &u.email == email))
    }

    /// Scan for a user by phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .find(|u| u.phone_number.as_ref() == Some(phone)))
    }

    /// Scan for a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.all().await?.into_iter().find(|u| &u.id == id))
    }

    /// Append a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` before writing anything when
    /// the email, or the phone number if given, is already registered.
    pub async fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.all().await?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }
        if let Some(phone) = &user.phone_number {
            if users.iter().any(|u| u.phone_number.as_ref() == Some(phone)) {
                return Err(RepositoryError::Conflict(format!(
                    "phone {phone} already registered"
                )));
            }
        }

        users.push(user);
        self.store.put(keys::USERS, &users).await?;
        Ok(())
    }

    /// Replace the stored record whose id matches `user.id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has that id.
    pub async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.all().await?;

        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user.id)))?;
        *slot = user.clone();

        self.store.put(keys::USERS, &users).await?;
        Ok(())
    }
}
