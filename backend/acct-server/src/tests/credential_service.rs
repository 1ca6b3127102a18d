use crate::{
    Add2faRequest, AddOtherCredentialRequest, ChangeEmailPasswordRequest, CredentialError,
    CredentialService, CreateNewPasswordRequest, ForgotPasswordRequest, LoginRequest,
    SignUpRequest, VerifyCredentialsRequest,
};

use acct_auth::TokenService;
use acct_core::{ProfileUpdate, UserProfile};
use acct_db::{DbError, ProfileRepository, ProfileStore, Result as DbErrorResult};
use acct_identity::{IdentityProvider, InMemoryIdentityProvider};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use error_location::ErrorLocation;
use googletest::prelude::*;

const TEST_SECRET: &[u8] = b"credential-service-test-secret-0123456789";
const PASSWORD: &str = "s3cret!pass";

struct Harness {
    service: CredentialService,
    store: Arc<ProfileRepository>,
    identity: Arc<InMemoryIdentityProvider>,
    tokens: Arc<TokenService>,
}

async fn harness() -> Harness {
    let pool = acct_db::connect("sqlite::memory:", 1).await.unwrap();
    let store = Arc::new(ProfileRepository::new(pool));
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let tokens = Arc::new(TokenService::with_hs256(TEST_SECRET));

    let service = CredentialService::new(store.clone(), identity.clone(), tokens.clone());

    Harness {
        service,
        store,
        identity,
        tokens,
    }
}

fn sign_up_with_email(email: &str) -> SignUpRequest {
    SignUpRequest {
        email: Some(email.to_string()),
        password: Some(PASSWORD.to_string()),
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        ..SignUpRequest::default()
    }
}

fn login_with(email_or_phone: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email_or_phone: Some(email_or_phone.to_string()),
        password: Some(password.to_string()),
    }
}

fn expect_validation(error: CredentialError) -> (String, Option<String>) {
    match error {
        CredentialError::Validation { message, field, .. } => (message, field),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =============================================================================
// sign_up
// =============================================================================

#[tokio::test]
async fn given_email_and_valid_password_when_sign_up_then_profile_and_identity_exist() {
    let h = harness().await;

    let uid = h
        .service
        .sign_up(sign_up_with_email("grace@example.com"))
        .await
        .unwrap();

    let profile = h.store.find_by_uid(&uid).await.unwrap().unwrap();
    assert_eq!(profile.email.as_deref(), Some("grace@example.com"));
    assert_eq!(profile.first_name.as_deref(), Some("Grace"));
    assert!(!profile.is_guest_user);
    assert!(!profile.is_2f_needed);
    assert!(h.identity.check_password(&uid, PASSWORD).await);
}

#[tokio::test]
async fn given_sign_up_when_stored_then_password_is_hashed() {
    let h = harness().await;

    let uid = h
        .service
        .sign_up(sign_up_with_email("hash@example.com"))
        .await
        .unwrap();

    let profile = h.store.find_by_uid(&uid).await.unwrap().unwrap();
    let hash = profile.password_hash.unwrap();
    assert_that!(hash.as_str(), not(eq(PASSWORD)));
    assert!(acct_auth::verify_password(PASSWORD, &hash));
}

#[tokio::test]
async fn given_phone_only_when_sign_up_then_succeeds() {
    let h = harness().await;

    let uid = h
        .service
        .sign_up(SignUpRequest {
            phone_number: Some("+14155552671".to_string()),
            password: Some(PASSWORD.to_string()),
            ..SignUpRequest::default()
        })
        .await
        .unwrap();

    let profile = h.store.find_by_phone("+14155552671").await.unwrap().unwrap();
    assert_that!(profile.uid.as_str(), eq(uid.as_str()));
    assert_eq!(profile.email, None);
}

#[tokio::test]
async fn given_short_password_when_sign_up_then_policy_message_and_no_identity() {
    let h = harness().await;

    let error = h
        .service
        .sign_up(SignUpRequest {
            email: Some("short@example.com".to_string()),
            password: Some("abc".to_string()),
            ..SignUpRequest::default()
        })
        .await
        .unwrap_err();

    let (message, field) = expect_validation(error);
    assert_that!(message.as_str(), contains_substring("too short"));
    assert_eq!(field.as_deref(), Some("password"));
    assert!(h.identity.is_empty().await);
}

#[tokio::test]
async fn given_no_contact_when_sign_up_then_contact_required() {
    let h = harness().await;

    let error = h
        .service
        .sign_up(SignUpRequest {
            email: Some(String::new()),
            phone_number: Some("   ".to_string()),
            password: Some(PASSWORD.to_string()),
            ..SignUpRequest::default()
        })
        .await
        .unwrap_err();

    let (message, _) = expect_validation(error);
    assert_that!(message.as_str(), eq("email or phone number is required"));
    assert!(h.identity.is_empty().await);
}

#[tokio::test]
async fn given_phone_without_plus_when_sign_up_then_format_error() {
    let h = harness().await;

    let error = h
        .service
        .sign_up(SignUpRequest {
            phone_number: Some("14155552671".to_string()),
            password: Some(PASSWORD.to_string()),
            ..SignUpRequest::default()
        })
        .await
        .unwrap_err();

    let (message, field) = expect_validation(error);
    assert_that!(
        message.as_str(),
        eq("invalid phone number format. should be in +countrycode format")
    );
    assert_eq!(field.as_deref(), Some("phone_number"));
}

#[tokio::test]
async fn given_missing_password_when_sign_up_then_password_required() {
    let h = harness().await;

    let error = h
        .service
        .sign_up(SignUpRequest {
            email: Some("nopass@example.com".to_string()),
            ..SignUpRequest::default()
        })
        .await
        .unwrap_err();

    let (message, field) = expect_validation(error);
    assert_that!(message.as_str(), eq("password is required"));
    assert_eq!(field.as_deref(), Some("password"));
}

#[tokio::test]
async fn given_taken_email_when_sign_up_then_provider_error() {
    let h = harness().await;
    h.service
        .sign_up(sign_up_with_email("taken@example.com"))
        .await
        .unwrap();

    let error = h
        .service
        .sign_up(sign_up_with_email("taken@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::Provider { .. }));
    assert_eq!(h.identity.len().await, 1);
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn given_registered_email_when_login_then_token_verifies_to_uid() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("login@example.com"))
        .await
        .unwrap();

    let session = h
        .service
        .login(login_with("login@example.com", PASSWORD))
        .await
        .unwrap();

    assert_that!(session.uid.as_str(), eq(uid.as_str()));
    assert_that!(h.tokens.verify(&session.token).unwrap().as_str(), eq(uid.as_str()));
}

#[tokio::test]
async fn given_registered_phone_when_login_then_succeeds() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(SignUpRequest {
            phone_number: Some("+447700900123".to_string()),
            password: Some(PASSWORD.to_string()),
            ..SignUpRequest::default()
        })
        .await
        .unwrap();

    let session = h
        .service
        .login(login_with("+447700900123", PASSWORD))
        .await
        .unwrap();

    assert_that!(session.uid.as_str(), eq(uid.as_str()));
}

#[tokio::test]
async fn given_mixed_case_email_at_sign_up_when_login_lowercase_then_succeeds() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("Alice@Example.com"))
        .await
        .unwrap();

    let session = h
        .service
        .login(login_with("alice@example.com", PASSWORD))
        .await
        .unwrap();

    assert_that!(session.uid.as_str(), eq(uid.as_str()));
    let profile = h.store.find_by_uid(&uid).await.unwrap().unwrap();
    assert_eq!(profile.email.as_deref(), Some("alice@example.com"));
}

#[tokio::test]
async fn given_lowercase_email_at_sign_up_when_login_mixed_case_then_succeeds() {
    let h = harness().await;
    h.service
        .sign_up(sign_up_with_email("bob@example.com"))
        .await
        .unwrap();

    assert!(
        h.service
            .login(login_with("BOB@Example.COM", PASSWORD))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn given_wrong_password_when_login_then_unauthenticated() {
    let h = harness().await;
    h.service
        .sign_up(sign_up_with_email("wrong@example.com"))
        .await
        .unwrap();

    let error = h
        .service
        .login(login_with("wrong@example.com", "n0t-the-pass!"))
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::Unauthenticated { .. }));
}

#[tokio::test]
async fn given_unknown_account_when_login_then_same_answer_as_wrong_password() {
    let h = harness().await;

    let error = h
        .service
        .login(login_with("nobody@example.com", PASSWORD))
        .await
        .unwrap_err();

    match error {
        CredentialError::Unauthenticated { message, .. } => {
            assert_that!(message.as_str(), eq("invalid credentials"));
        }
        other => panic!("expected unauthenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn given_guest_profile_when_login_then_unauthenticated() {
    let h = harness().await;
    let session = h.service.guest_login().await.unwrap();
    h.service
        .add_other_credential(
            &session.uid,
            AddOtherCredentialRequest {
                email: Some("guest@example.com".to_string()),
                phone: None,
            },
        )
        .await
        .unwrap();

    let error = h
        .service
        .login(login_with("guest@example.com", PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::Unauthenticated { .. }));
}

#[tokio::test]
async fn given_login_when_succeeds_then_last_login_advances() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("seen@example.com"))
        .await
        .unwrap();
    let before = h.store.find_by_uid(&uid).await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    h.service
        .login(login_with("seen@example.com", PASSWORD))
        .await
        .unwrap();

    let after = h.store.find_by_uid(&uid).await.unwrap().unwrap();
    assert!(after.last_login_at > before.last_login_at);
}

#[tokio::test]
async fn given_missing_identifier_when_login_then_validation_error() {
    let h = harness().await;

    let error = h
        .service
        .login(LoginRequest {
            email_or_phone: None,
            password: Some(PASSWORD.to_string()),
        })
        .await
        .unwrap_err();

    let (_, field) = expect_validation(error);
    assert_eq!(field.as_deref(), Some("email_or_phone"));
}

// =============================================================================
// guest_login / verify_credentials
// =============================================================================

#[tokio::test]
async fn given_guest_login_then_guest_profile_and_valid_token() {
    let h = harness().await;

    let session = h.service.guest_login().await.unwrap();

    let profile = h.store.find_by_uid(&session.uid).await.unwrap().unwrap();
    assert!(profile.is_guest_user);
    assert_eq!(profile.email, None);
    assert_eq!(profile.password_hash, None);
    assert_that!(
        h.tokens.verify(&session.token).unwrap().as_str(),
        eq(session.uid.as_str())
    );
}

#[tokio::test]
async fn given_two_guest_logins_then_distinct_subjects() {
    let h = harness().await;

    let first = h.service.guest_login().await.unwrap();
    let second = h.service.guest_login().await.unwrap();

    assert_that!(first.uid.as_str(), not(eq(second.uid.as_str())));
}

#[tokio::test]
async fn given_registered_email_when_verify_credentials_then_exists_with_uid() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("exists@example.com"))
        .await
        .unwrap();

    let check = h
        .service
        .verify_credentials(VerifyCredentialsRequest {
            email_or_phone: Some("exists@example.com".to_string()),
        })
        .await
        .unwrap();

    assert!(check.exists);
    assert_eq!(check.uid, Some(uid));
}

#[tokio::test]
async fn given_unknown_phone_when_verify_credentials_then_not_exists() {
    let h = harness().await;

    let check = h
        .service
        .verify_credentials(VerifyCredentialsRequest {
            email_or_phone: Some("+15550000000".to_string()),
        })
        .await
        .unwrap();

    assert!(!check.exists);
    assert_eq!(check.uid, None);
}

// =============================================================================
// forgot_password / create_new_password
// =============================================================================

#[tokio::test]
async fn given_registered_email_when_forgot_password_then_link_names_email() {
    let h = harness().await;
    h.service
        .sign_up(sign_up_with_email("reset@example.com"))
        .await
        .unwrap();

    let link = h
        .service
        .forgot_password(ForgotPasswordRequest {
            email: Some("reset@example.com".to_string()),
        })
        .await
        .unwrap();

    assert_that!(link.as_str(), contains_substring("mode=resetPassword"));
    assert_that!(link.as_str(), contains_substring("reset%40example.com"));
}

#[tokio::test]
async fn given_malformed_email_when_forgot_password_then_validation_error() {
    let h = harness().await;

    let error = h
        .service
        .forgot_password(ForgotPasswordRequest {
            email: Some("not-an-email".to_string()),
        })
        .await
        .unwrap_err();

    let (message, _) = expect_validation(error);
    assert_that!(message.as_str(), eq("invalid email address format"));
}

#[tokio::test]
async fn given_new_password_when_create_new_password_then_login_uses_it() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("renew@example.com"))
        .await
        .unwrap();

    h.service
        .create_new_password(CreateNewPasswordRequest {
            email: Some("renew@example.com".to_string()),
            password: Some("n3w-passw0rd!".to_string()),
        })
        .await
        .unwrap();

    assert!(h.identity.check_password(&uid, "n3w-passw0rd!").await);
    assert!(
        h.service
            .login(login_with("renew@example.com", "n3w-passw0rd!"))
            .await
            .is_ok()
    );
    assert!(
        h.service
            .login(login_with("renew@example.com", PASSWORD))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn given_unknown_email_when_create_new_password_then_not_found() {
    let h = harness().await;

    let error = h
        .service
        .create_new_password(CreateNewPasswordRequest {
            email: Some("ghost@example.com".to_string()),
            password: Some("n3w-passw0rd!".to_string()),
        })
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::NotFound { .. }));
}

#[tokio::test]
async fn given_weak_password_when_create_new_password_then_policy_error() {
    let h = harness().await;

    let error = h
        .service
        .create_new_password(CreateNewPasswordRequest {
            email: Some("weak@example.com".to_string()),
            password: Some("lettersonly!".to_string()),
        })
        .await
        .unwrap_err();

    let (message, _) = expect_validation(error);
    assert_that!(message.as_str(), contains_substring("number"));
}

// =============================================================================
// change_email_password / add_2fa / add_other_credential
// =============================================================================

#[tokio::test]
async fn given_new_email_when_change_email_password_then_unverified_and_mirrored() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("old@example.com"))
        .await
        .unwrap();
    h.store
        .update(
            &uid,
            &ProfileUpdate {
                is_email_verified: Some(true),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

    h.service
        .change_email_password(
            &uid,
            ChangeEmailPasswordRequest {
                email: Some("new@example.com".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();

    let profile = h.store.find_by_uid(&uid).await.unwrap().unwrap();
    assert_eq!(profile.email.as_deref(), Some("new@example.com"));
    assert!(!profile.is_email_verified);
}

#[tokio::test]
async fn given_neither_field_when_change_email_password_then_validation_error() {
    let h = harness().await;

    let error = h
        .service
        .change_email_password("any-uid", ChangeEmailPasswordRequest::default())
        .await
        .unwrap_err();

    let (message, _) = expect_validation(error);
    assert_that!(message.as_str(), eq("email or password is required"));
}

#[tokio::test]
async fn given_flag_when_add_2fa_then_profile_reflects_it() {
    let h = harness().await;
    let uid = h
        .service
        .sign_up(sign_up_with_email("twofa@example.com"))
        .await
        .unwrap();

    h.service
        .add_2fa(
            &uid,
            Add2faRequest {
                is_2f_needed: Some(true),
            },
        )
        .await
        .unwrap();
    assert!(h.store.find_by_uid(&uid).await.unwrap().unwrap().is_2f_needed);

    h.service
        .add_2fa(
            &uid,
            Add2faRequest {
                is_2f_needed: Some(false),
            },
        )
        .await
        .unwrap();
    assert!(!h.store.find_by_uid(&uid).await.unwrap().unwrap().is_2f_needed);
}

#[tokio::test]
async fn given_missing_flag_when_add_2fa_then_validation_error() {
    let h = harness().await;

    let error = h
        .service
        .add_2fa("any-uid", Add2faRequest::default())
        .await
        .unwrap_err();

    let (_, field) = expect_validation(error);
    assert_eq!(field.as_deref(), Some("is2FNeeded"));
}

#[tokio::test]
async fn given_unknown_subject_when_add_2fa_then_not_found() {
    let h = harness().await;

    let error = h
        .service
        .add_2fa(
            "no-such-uid",
            Add2faRequest {
                is_2f_needed: Some(true),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::NotFound { .. }));
}

#[tokio::test]
async fn given_guest_when_add_other_credential_then_phone_attached_and_still_guest() {
    let h = harness().await;
    let session = h.service.guest_login().await.unwrap();

    h.service
        .add_other_credential(
            &session.uid,
            AddOtherCredentialRequest {
                email: None,
                phone: Some("+819012345678".to_string()),
            },
        )
        .await
        .unwrap();

    let profile = h.store.find_by_uid(&session.uid).await.unwrap().unwrap();
    assert_eq!(profile.phone_number.as_deref(), Some("+819012345678"));
    assert!(!profile.is_phone_verified);
    assert!(profile.is_guest_user);
}

#[tokio::test]
async fn given_bad_phone_when_add_other_credential_then_field_is_phone() {
    let h = harness().await;

    let error = h
        .service
        .add_other_credential(
            "any-uid",
            AddOtherCredentialRequest {
                email: None,
                phone: Some("5551234".to_string()),
            },
        )
        .await
        .unwrap_err();

    let (_, field) = expect_validation(error);
    assert_eq!(field.as_deref(), Some("phone"));
}

// =============================================================================
// store failures
// =============================================================================

/// Store whose writes always fail
struct FailingStore;

#[track_caller]
fn unavailable() -> DbError {
    DbError::Initialization {
        message: "store unavailable".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[async_trait]
impl ProfileStore for FailingStore {
    async fn create(&self, _profile: &UserProfile) -> DbErrorResult<()> {
        Err(unavailable())
    }

    async fn find_by_uid(&self, _uid: &str) -> DbErrorResult<Option<UserProfile>> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> DbErrorResult<Option<UserProfile>> {
        Err(unavailable())
    }

    async fn find_by_phone(&self, _phone_number: &str) -> DbErrorResult<Option<UserProfile>> {
        Err(unavailable())
    }

    async fn update(&self, _uid: &str, _update: &ProfileUpdate) -> DbErrorResult<bool> {
        Err(unavailable())
    }
}

fn failing_service() -> (CredentialService, Arc<InMemoryIdentityProvider>) {
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let service = CredentialService::new(
        Arc::new(FailingStore),
        identity.clone(),
        Arc::new(TokenService::with_hs256(TEST_SECRET)),
    );
    (service, identity)
}

#[tokio::test]
async fn given_store_down_when_sign_up_then_store_error_after_identity_created() {
    let (service, identity) = failing_service();

    let error = service
        .sign_up(sign_up_with_email("orphan@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::Store { .. }));
    assert_eq!(identity.len().await, 1);
}

#[tokio::test]
async fn given_store_down_when_login_then_store_error() {
    let (service, _) = failing_service();

    let error = service
        .login(login_with("someone@example.com", PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(error, CredentialError::Store { .. }));
}

#[tokio::test]
async fn given_store_down_when_change_email_password_then_provider_change_still_succeeds() {
    let (service, identity) = failing_service();
    let uid = identity.create_anonymous_user().await.unwrap();

    service
        .change_email_password(
            &uid,
            ChangeEmailPasswordRequest {
                email: None,
                password: Some("n3w-passw0rd!".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(identity.check_password(&uid, "n3w-passw0rd!").await);
}
