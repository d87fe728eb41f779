//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
///
/// Variant messages double as the user-facing banner text; the UI layer
/// displays them verbatim. Every failure is terminal per call - there is
/// no retry policy.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] pocket_bazaar_core::EmailError),

    /// Invalid phone number format.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] pocket_bazaar_core::PhoneError),

    /// Wrong password or unknown email.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up email collision.
    #[error("Email already registered")]
    EmailTaken,

    /// Sign-up phone collision.
    #[error("Phone number already registered")]
    PhoneTaken,

    /// Phone sign-in for a number with no account.
    #[error("No account found for this phone number")]
    PhoneNotFound,

    /// Password reset for an email with no account.
    #[error("No account found for this email")]
    AccountNotFound,

    /// The OTP entered at phone sign-in is too short.
    #[error("OTP must be at least {min} digits")]
    OtpTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The OTP does not match the issued code, or none was issued.
    #[error("Invalid or expired OTP")]
    InvalidOtp,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// An operation that needs a session was called signed out.
    #[error("Not signed in")]
    NotSignedIn,

    /// Address id not present in the signed-in user's address book.
    #[error("Address not found")]
    AddressNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
