//! Integration tests for the authentication service.
//!
//! Each test runs against a scratch data directory; nothing external is
//! required.

#![allow(clippy::unwrap_used)]

use pocket_bazaar_core::AddressId;
use pocket_bazaar_storefront::db::users::UserRepository;
use pocket_bazaar_storefront::models::user::NewAddress;
use pocket_bazaar_storefront::models::user::ProfileUpdate;
use pocket_bazaar_storefront::storage::keys;
use pocket_bazaar_storefront::{AuthError, AuthService, KvStore};

async fn scratch_store() -> (tempfile::TempDir, KvStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::open(dir.path()).await.unwrap();
    (dir, store)
}

async fn sign_up_jane(auth: &AuthService<'_>) {
    auth.sign_up("Jane", "Mensah", "jane@example.com", "correct-horse", None)
        .await
        .unwrap();
}

/// Read the issued OTP straight out of storage, standing in for the
/// missing delivery channel.
async fn issued_otp(store: &KvStore, email: &str) -> String {
    let email = email.parse().unwrap();
    store
        .get::<String>(&keys::otp(&email))
        .await
        .unwrap()
        .unwrap()
}

// ============================================================================
// Sign-up / sign-in
// ============================================================================

#[tokio::test]
async fn sign_up_logs_in_and_session_survives_restart() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    sign_up_jane(&auth).await;

    // A fresh service over the same store sees the session.
    let auth2 = AuthService::new(&store);
    let (_token, user) = auth2.restore_session().await.unwrap().unwrap();
    assert_eq!(user.email.as_str(), "jane@example.com");
    assert_eq!(user.display_name(), "Jane Mensah");
}

#[tokio::test]
async fn sign_in_with_wrong_password_fails() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;
    auth.sign_out().await.unwrap();

    let err = auth.sign_in("jane@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(auth.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_in_with_unknown_email_fails_identically() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    let err = auth
        .sign_in("nobody@example.com", "whatever1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_email_fails_before_any_record_is_written() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;

    let err = auth
        .sign_up("Other", "Person", "jane@example.com", "password123", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));

    let users = UserRepository::new(&store).all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users.first().unwrap().first_name, "Jane");
}

#[tokio::test]
async fn duplicate_phone_fails() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    auth.sign_up(
        "Jane",
        "Mensah",
        "jane@example.com",
        "correct-horse",
        Some("5550102345"),
    )
    .await
    .unwrap();

    let err = auth
        .sign_up(
            "Kofi",
            "Owusu",
            "kofi@example.com",
            "password123",
            Some("5550102345"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PhoneTaken));
}

#[tokio::test]
async fn weak_password_is_rejected() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    let err = auth
        .sign_up("Jane", "Mensah", "jane@example.com", "short", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::WeakPassword(_)));
}

// ============================================================================
// Phone + OTP sign-in
// ============================================================================

#[tokio::test]
async fn phone_sign_in_accepts_any_long_enough_otp() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    auth.sign_up(
        "Jane",
        "Mensah",
        "jane@example.com",
        "correct-horse",
        Some("5550102345"),
    )
    .await
    .unwrap();
    auth.sign_out().await.unwrap();

    // No OTP was ever issued; only the length is checked.
    let user = auth.sign_in_with_phone("5550102345", "0000").await.unwrap();
    assert_eq!(user.email.as_str(), "jane@example.com");
}

#[tokio::test]
async fn phone_sign_in_rejects_short_otp() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    let err = auth
        .sign_in_with_phone("5550102345", "123")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::OtpTooShort { min: 4 }));
}

#[tokio::test]
async fn phone_sign_in_unknown_number_fails() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    let err = auth
        .sign_in_with_phone("5559999999", "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PhoneNotFound));
}

// ============================================================================
// OTP / password reset
// ============================================================================

#[tokio::test]
async fn verify_otp_consumes_the_code() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    auth.send_otp("jane@example.com").await.unwrap();
    let code = issued_otp(&store, "jane@example.com").await;
    assert_eq!(code.len(), 4);

    auth.verify_otp("jane@example.com", &code).await.unwrap();

    // Deleted on success: a second verify fails.
    let err = auth
        .verify_otp("jane@example.com", &code)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));
}

#[tokio::test]
async fn verify_otp_mismatch_keeps_the_code() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    auth.send_otp("jane@example.com").await.unwrap();
    let code = issued_otp(&store, "jane@example.com").await;
    let wrong = if code == "1111" { "2222" } else { "1111" };

    let err = auth
        .verify_otp("jane@example.com", wrong)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));

    // Still present, so the right code works afterwards.
    auth.verify_otp("jane@example.com", &code).await.unwrap();
}

#[tokio::test]
async fn reset_password_with_mismatched_otp_never_touches_the_password() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;
    auth.sign_out().await.unwrap();

    auth.send_otp("jane@example.com").await.unwrap();
    let code = issued_otp(&store, "jane@example.com").await;
    let wrong = if code == "1111" { "2222" } else { "1111" };

    let err = auth
        .reset_password("jane@example.com", wrong, "new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));

    // Old password still signs in.
    auth.sign_in("jane@example.com", "correct-horse")
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_password_with_valid_otp_replaces_the_password() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;
    auth.sign_out().await.unwrap();

    auth.send_otp("jane@example.com").await.unwrap();
    let code = issued_otp(&store, "jane@example.com").await;

    auth.reset_password("jane@example.com", &code, "brand-new-pass")
        .await
        .unwrap();

    let err = auth
        .sign_in("jane@example.com", "correct-horse")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    auth.sign_in("jane@example.com", "brand-new-pass")
        .await
        .unwrap();
}

// ============================================================================
// Profile and addresses
// ============================================================================

#[tokio::test]
async fn update_profile_merges_and_persists_into_users_list() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;

    auth.update_profile(ProfileUpdate {
        last_name: Some("Asante".to_owned()),
        ..ProfileUpdate::default()
    })
    .await
    .unwrap();

    // Survives a sign-out / sign-in cycle, so the users list was updated
    // too, not just the session mirror.
    auth.sign_out().await.unwrap();
    let user = auth
        .sign_in("jane@example.com", "correct-horse")
        .await
        .unwrap();
    assert_eq!(user.last_name, "Asante");
}

#[tokio::test]
async fn update_profile_requires_a_session() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    let err = auth
        .update_profile(ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotSignedIn));
}

fn new_address(street: &str, make_default: bool) -> NewAddress {
    NewAddress {
        street: street.to_owned(),
        city: "Accra".to_owned(),
        zip: "00233".to_owned(),
        country: "Ghana".to_owned(),
        make_default,
    }
}

fn default_streets(user: &pocket_bazaar_storefront::models::User) -> Vec<&str> {
    user.addresses
        .iter()
        .filter(|a| a.is_default)
        .map(|a| a.street.as_str())
        .collect()
}

#[tokio::test]
async fn first_address_becomes_default() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;

    let address = auth.add_address(new_address("1 Market St", false)).await.unwrap();
    assert!(address.is_default);
}

#[tokio::test]
async fn make_default_moves_the_flag() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;

    auth.add_address(new_address("1 Market St", false))
        .await
        .unwrap();
    auth.add_address(new_address("2 Ring Rd", true))
        .await
        .unwrap();

    let user = auth.current_user().await.unwrap().unwrap();
    assert_eq!(default_streets(&user), vec!["2 Ring Rd"]);
}

#[tokio::test]
async fn removing_the_default_promotes_another() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;

    let first = auth
        .add_address(new_address("1 Market St", false))
        .await
        .unwrap();
    auth.add_address(new_address("2 Ring Rd", false))
        .await
        .unwrap();

    auth.remove_address(&first.id).await.unwrap();

    let user = auth.current_user().await.unwrap().unwrap();
    assert_eq!(default_streets(&user), vec!["2 Ring Rd"]);
}

#[tokio::test]
async fn set_default_address_unknown_id_fails() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);
    sign_up_jane(&auth).await;

    let err = auth
        .set_default_address(&AddressId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AddressNotFound));
}

// ============================================================================
// Onboarding
// ============================================================================

#[tokio::test]
async fn onboarding_flag_round_trips() {
    let (_dir, store) = scratch_store().await;
    let auth = AuthService::new(&store);

    assert!(!auth.has_seen_onboarding().await.unwrap());
    auth.mark_onboarding_seen().await.unwrap();
    assert!(auth.has_seen_onboarding().await.unwrap());
}
