//! Authentication service.
//!
//! Owns the registered-users list, the current session, OTP issuance,
//! and profile/address management. Sessions persist under `userToken` +
//! `userData` so they survive an app restart.
//!
//! Passwords are stored as argon2 hashes. Phone + OTP sign-in keeps the
//! original client's quirk: the code is only length-checked, never
//! matched against an issued value (no SMS backend exists to send one).

mod error;

pub use error::AuthError;

use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use tracing::{debug, info};

use pocket_bazaar_core::{AddressId, Email, Phone, SessionToken, UserId};

use crate::db::session::SessionRepository;
use crate::db::users::UserRepository;
use crate::models::user::{Address, NewAddress, ProfileUpdate, User, normalize_default};
use crate::storage::KvStore;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum accepted OTP length at phone sign-in.
const MIN_OTP_LENGTH: usize = 4;

/// Authentication service.
///
/// Handles sign-up, sign-in (email + password and phone + OTP), sign-out,
/// OTP issuance and password reset, profile updates, and the address
/// book. Address writes re-establish the exactly-one-default invariant
/// here rather than trusting callers.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    sessions: SessionRepository<'a>,
    latency: Option<Duration>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a KvStore) -> Self {
        Self {
            users: UserRepository::new(store),
            sessions: SessionRepository::new(store),
            latency: None,
        }
    }

    /// Create a service that sleeps before each call, imitating the
    /// backend round-trip of the mobile client.
    #[must_use]
    pub const fn with_latency(store: &'a KvStore, latency: Duration) -> Self {
        Self {
            users: UserRepository::new(store),
            sessions: SessionRepository::new(store),
            latency: Some(latency),
        }
    }

    async fn simulate_call(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Reload the persisted session at startup.
    ///
    /// Returns `None` unless both the token and the profile mirror are
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if a read fails.
    pub async fn restore_session(&self) -> Result<Option<(SessionToken, User)>, AuthError> {
        let token = self.sessions.token().await?;
        let user = self.sessions.current_user().await?;
        Ok(token.zip(user))
    }

    /// The signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the read fails.
    pub async fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.sessions.current_user().await?)
    }

    async fn require_current_user(&self) -> Result<User, AuthError> {
        self.sessions
            .current_user()
            .await?
            .ok_or(AuthError::NotSignedIn)
    }

    async fn establish_session(&self, user: &User) -> Result<SessionToken, AuthError> {
        let token = SessionToken::generate();
        self.sessions.set(&token, user).await?;
        Ok(token)
    }

    // =========================================================================
    // Sign-in / Sign-up
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// Linear scan of the stored users list; any mismatch (unknown email
    /// or wrong password) reports the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on mismatch.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_call().await;

        let email = Email::parse(email)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        self.establish_session(&user).await?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    /// Sign in with phone number and OTP.
    ///
    /// The OTP is only length-checked; it is never compared against an
    /// issued code. Faithful to the client this replaces, which had no
    /// SMS channel to deliver one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::OtpTooShort` for a short code and
    /// `AuthError::PhoneNotFound` when no account has the number.
    pub async fn sign_in_with_phone(&self, phone: &str, otp: &str) -> Result<User, AuthError> {
        self.simulate_call().await;

        let phone = Phone::parse(phone)?;
        if otp.trim().len() < MIN_OTP_LENGTH {
            return Err(AuthError::OtpTooShort {
                min: MIN_OTP_LENGTH,
            });
        }

        let user = self
            .users
            .find_by_phone(&phone)
            .await?
            .ok_or(AuthError::PhoneNotFound)?;

        self.establish_session(&user).await?;
        info!(user = %user.id, "signed in via phone");
        Ok(user)
    }

    /// Register a new user and sign them in.
    ///
    /// Uniqueness is checked by linear scan before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` / `AuthError::PhoneTaken` on
    /// collision and `AuthError::WeakPassword` if the password is too
    /// short.
    pub async fn sign_up(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> Result<User, AuthError> {
        self.simulate_call().await;

        let email = Email::parse(email)?;
        let phone = phone.map(Phone::parse).transpose()?;
        validate_password(password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        if let Some(phone) = &phone {
            if self.users.find_by_phone(phone).await?.is_some() {
                return Err(AuthError::PhoneTaken);
            }
        }

        let user = User {
            id: UserId::generate(),
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            email,
            phone_number: phone,
            password_hash: hash_password(password)?,
            addresses: Vec::new(),
        };

        self.users.insert(user.clone()).await?;
        self.establish_session(&user).await?;
        info!(user = %user.id, "signed up");
        Ok(user)
    }

    /// Sign out: drop the session token and profile mirror.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if a deletion fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.simulate_call().await;
        self.sessions.clear().await?;
        debug!("signed out");
        Ok(())
    }

    // =========================================================================
    // OTP / Password reset
    // =========================================================================

    /// Issue a 4-digit OTP for `email`.
    ///
    /// There is no delivery channel; the code is persisted under
    /// `otp-<email>` and logged as the simulated delivery.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the write fails.
    pub async fn send_otp(&self, email: &str) -> Result<(), AuthError> {
        self.simulate_call().await;

        let email = Email::parse(email)?;
        let code = rand::rng().random_range(1000..=9999).to_string();
        self.sessions.set_otp(&email, &code).await?;
        info!(%email, code, "simulated OTP delivery");
        Ok(())
    }

    /// Verify an OTP, deleting it on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOtp` on mismatch or if none was issued.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AuthError> {
        self.simulate_call().await;
        let email = Email::parse(email)?;
        self.consume_otp(&email, otp).await
    }

    /// Reset a password after re-validating the OTP.
    ///
    /// A mismatched OTP fails before the stored password is touched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOtp` on OTP mismatch,
    /// `AuthError::AccountNotFound` for an unknown email, and
    /// `AuthError::WeakPassword` if the new password is too short.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.simulate_call().await;

        let email = Email::parse(email)?;
        self.consume_otp(&email, otp).await?;
        validate_password(new_password)?;

        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        user.password_hash = hash_password(new_password)?;

        self.persist_user(&user).await?;
        info!(user = %user.id, "password reset");
        Ok(())
    }

    /// Compare against the issued code and delete it on success.
    async fn consume_otp(&self, email: &Email, otp: &str) -> Result<(), AuthError> {
        let issued = self.sessions.otp(email).await?;
        if issued.as_deref() != Some(otp.trim()) {
            return Err(AuthError::InvalidOtp);
        }
        self.sessions.delete_otp(email).await?;
        Ok(())
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Merge partial fields into the signed-in user.
    ///
    /// The merged record is written to the users list (matched by id) and
    /// to the `userData` mirror.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` when no session exists.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError> {
        self.simulate_call().await;

        let mut user = self.require_current_user().await?;
        update.apply(&mut user);
        self.persist_user(&user).await?;
        debug!(user = %user.id, "profile updated");
        Ok(user)
    }

    /// Write a user to both the users list and the session mirror, when
    /// the session belongs to them.
    async fn persist_user(&self, user: &User) -> Result<(), AuthError> {
        self.users.update(user).await?;
        if let Some(current) = self.sessions.current_user().await? {
            if current.id == user.id {
                self.sessions.set_current_user(user).await?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Address book
    // =========================================================================

    /// Add an address to the signed-in user's book.
    ///
    /// The first address always becomes the default; `make_default`
    /// promotes later ones.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` when no session exists.
    pub async fn add_address(&self, new: NewAddress) -> Result<Address, AuthError> {
        self.simulate_call().await;

        let mut user = self.require_current_user().await?;
        let address = Address {
            id: AddressId::generate(),
            street: new.street,
            city: new.city,
            zip: new.zip,
            country: new.country,
            is_default: false,
        };
        let id = address.id.clone();
        user.addresses.push(address);

        let prefer = new.make_default.then(|| id.clone());
        normalize_default(&mut user.addresses, prefer.as_ref());
        self.persist_user(&user).await?;

        // The pushed address still exists after normalization.
        user.addresses
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(AuthError::AddressNotFound)
    }

    /// Replace the fields of an existing address.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AddressNotFound` for an unknown id.
    pub async fn update_address(
        &self,
        id: &AddressId,
        fields: NewAddress,
    ) -> Result<Address, AuthError> {
        self.simulate_call().await;

        let mut user = self.require_current_user().await?;
        {
            let address = user
                .addresses
                .iter_mut()
                .find(|a| &a.id == id)
                .ok_or(AuthError::AddressNotFound)?;
            address.street = fields.street;
            address.city = fields.city;
            address.zip = fields.zip;
            address.country = fields.country;
        }

        let prefer = fields.make_default.then(|| id.clone());
        normalize_default(&mut user.addresses, prefer.as_ref());
        self.persist_user(&user).await?;

        user.addresses
            .into_iter()
            .find(|a| &a.id == id)
            .ok_or(AuthError::AddressNotFound)
    }

    /// Remove an address. If it was the default, another address is
    /// promoted so the invariant holds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AddressNotFound` for an unknown id.
    pub async fn remove_address(&self, id: &AddressId) -> Result<(), AuthError> {
        self.simulate_call().await;

        let mut user = self.require_current_user().await?;
        let before = user.addresses.len();
        user.addresses.retain(|a| &a.id != id);
        if user.addresses.len() == before {
            return Err(AuthError::AddressNotFound);
        }

        normalize_default(&mut user.addresses, None);
        self.persist_user(&user).await?;
        Ok(())
    }

    /// Make an existing address the default.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AddressNotFound` for an unknown id.
    pub async fn set_default_address(&self, id: &AddressId) -> Result<(), AuthError> {
        self.simulate_call().await;

        let mut user = self.require_current_user().await?;
        if !user.addresses.iter().any(|a| &a.id == id) {
            return Err(AuthError::AddressNotFound);
        }

        normalize_default(&mut user.addresses, Some(id));
        self.persist_user(&user).await?;
        Ok(())
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    /// Whether the onboarding carousel has been dismissed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the read fails.
    pub async fn has_seen_onboarding(&self) -> Result<bool, AuthError> {
        Ok(self.sessions.has_seen_onboarding().await?)
    }

    /// Mark the onboarding carousel as dismissed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the write fails.
    pub async fn mark_onboarding_seen(&self) -> Result<(), AuthError> {
        Ok(self.sessions.mark_onboarding_seen().await?)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
