//! Credential flows.
//!
//! Each operation validates its input, talks to the identity provider and the
//! profile store in a fixed order, and stops at the first failure. Nothing is
//! retried or rolled back. Where the provider is the source of truth, the
//! profile store receives a best-effort mirror of the change: a failed mirror
//! write is logged and does not fail the request.

use crate::credentials::credential_error::{CredentialError, Result as CredentialResult};
use crate::{
    Add2faRequest, AddOtherCredentialRequest, ChangeEmailPasswordRequest,
    CreateNewPasswordRequest, ForgotPasswordRequest, LoginRequest, SignUpRequest,
    VerifyCredentialsRequest,
};

use acct_auth::{TokenService, hash_password, verify_password};
use acct_core::{
    Identifier, ProfileUpdate, UserProfile, validate_email, validate_password,
    validate_phone_number,
};
use acct_db::ProfileStore;
use acct_identity::{IdentityProvider, IdentityUpdate, NewIdentity};

use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};

/// A freshly authenticated subject
#[derive(Debug, Clone)]
pub struct Session {
    pub uid: String,
    pub token: String,
}

/// Outcome of an existence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCheck {
    pub exists: bool,
    pub uid: Option<String>,
}

pub struct CredentialService {
    store: Arc<dyn ProfileStore>,
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<TokenService>,
}

/// Drop absent, empty and whitespace-only values
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Emails are compared case-insensitively by the identity provider
fn present_email(value: Option<String>) -> Option<String> {
    present(value).map(|v| v.to_lowercase())
}

/// Passwords are taken verbatim; only an empty string counts as absent
fn present_password(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[track_caller]
fn required(value: Option<String>, field: &str, message: &str) -> CredentialResult<String> {
    value.ok_or_else(|| CredentialError::validation(message, field))
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            identity,
            tokens,
        }
    }

    /// Register an account with a password and an email and/or phone number.
    /// Returns the provider-assigned uid.
    pub async fn sign_up(&self, request: SignUpRequest) -> CredentialResult<String> {
        let password = required(
            present_password(request.password),
            "password",
            "password is required",
        )?;
        validate_password(&password)?;

        let email = present_email(request.email);
        let phone_number = present(request.phone_number);

        if email.is_none() && phone_number.is_none() {
            return Err(CredentialError::invalid_request("email or phone number is required"));
        }
        if let Some(email) = &email {
            validate_email(email, "email")?;
        }
        if let Some(phone_number) = &phone_number {
            validate_phone_number(phone_number, "phone_number")?;
        }

        let password_hash = hash_password(&password)?;

        let uid = self
            .identity
            .create_user(&NewIdentity {
                email: email.clone(),
                phone_number: phone_number.clone(),
                password: Some(password),
            })
            .await
            .map_err(|e| CredentialError::provider("failed to create user in identity provider", e))?;

        let profile = UserProfile {
            email,
            phone_number,
            first_name: present(request.first_name),
            last_name: present(request.last_name),
            country: present(request.country),
            address: present(request.address),
            ..UserProfile::registered(uid.clone(), password_hash, Utc::now())
        };

        if let Err(e) = self.store.create(&profile).await {
            error!("Identity {} created but profile write failed: {}", uid, e);
            return Err(CredentialError::store("failed to store user profile", e));
        }

        info!("Signed up {}", uid);
        Ok(uid)
    }

    /// Authenticate with email-or-phone and password, issuing a token
    pub async fn login(&self, request: LoginRequest) -> CredentialResult<Session> {
        let identifier = required(
            present(request.email_or_phone),
            "email_or_phone",
            "email or phone number is required",
        )?;
        let password = required(
            present_password(request.password),
            "password",
            "password is required",
        )?;

        let Some(profile) = self.find_by_identifier(&identifier).await? else {
            return Err(CredentialError::invalid_credentials());
        };

        let Some(password_hash) = profile.password_hash.as_deref() else {
            return Err(CredentialError::invalid_credentials());
        };

        if !verify_password(&password, password_hash) {
            return Err(CredentialError::invalid_credentials());
        }

        let seen = ProfileUpdate {
            last_login_at: Some(Utc::now()),
            ..ProfileUpdate::default()
        };
        match self.store.update(&profile.uid, &seen).await {
            Ok(true) => {}
            Ok(false) => warn!("Last-login update matched no profile for {}", profile.uid),
            Err(e) => warn!("Failed to record login for {}: {}", profile.uid, e),
        }

        let token = self.tokens.issue(&profile.uid)?;
        info!("Login for {}", profile.uid);

        Ok(Session {
            uid: profile.uid,
            token,
        })
    }

    /// Create an anonymous identity with a guest profile, issuing a token
    pub async fn guest_login(&self) -> CredentialResult<Session> {
        let uid = self
            .identity
            .create_anonymous_user()
            .await
            .map_err(|e| CredentialError::provider("failed to create guest user", e))?;

        let profile = UserProfile::guest(uid.clone(), Utc::now());
        self.store
            .create(&profile)
            .await
            .map_err(|e| CredentialError::store("failed to store guest profile", e))?;

        let token = self.tokens.issue(&uid)?;
        info!("Guest login for {}", uid);

        Ok(Session { uid, token })
    }

    /// Whether an email or phone number belongs to an existing profile
    pub async fn verify_credentials(
        &self,
        request: VerifyCredentialsRequest,
    ) -> CredentialResult<CredentialCheck> {
        let identifier = required(
            present(request.email_or_phone),
            "email_or_phone",
            "email or phone number is required",
        )?;

        let profile = self.find_by_identifier(&identifier).await?;

        Ok(CredentialCheck {
            exists: profile.is_some(),
            uid: profile.map(|p| p.uid),
        })
    }

    /// Ask the provider for a password reset link
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> CredentialResult<String> {
        let email = required(present_email(request.email), "email", "email is required")?;
        validate_email(&email, "email")?;

        self.identity
            .password_reset_link(&email)
            .await
            .map_err(|e| CredentialError::provider("failed to generate password reset link", e))
    }

    /// Replace the password of the account registered under an email
    pub async fn create_new_password(
        &self,
        request: CreateNewPasswordRequest,
    ) -> CredentialResult<()> {
        let email = required(present_email(request.email), "email", "email is required")?;
        validate_email(&email, "email")?;
        let password = required(
            present_password(request.password),
            "password",
            "password is required",
        )?;
        validate_password(&password)?;

        let record = self
            .identity
            .get_user_by_email(&email)
            .await
            .map_err(|e| CredentialError::provider("failed to look up user", e))?
            .ok_or_else(|| CredentialError::not_found("no account found for this email"))?;

        let password_hash = hash_password(&password)?;

        self.identity
            .update_user(
                &record.uid,
                &IdentityUpdate {
                    password: Some(password),
                    ..IdentityUpdate::default()
                },
            )
            .await
            .map_err(|e| CredentialError::provider("failed to update password", e))?;

        self.mirror(
            &record.uid,
            ProfileUpdate {
                password_hash: Some(password_hash),
                ..ProfileUpdate::default()
            },
        )
        .await;

        info!("Password replaced for {}", record.uid);
        Ok(())
    }

    /// Change the email and/or password of the authenticated subject
    pub async fn change_email_password(
        &self,
        uid: &str,
        request: ChangeEmailPasswordRequest,
    ) -> CredentialResult<()> {
        let email = present_email(request.email);
        let password = present_password(request.password);

        if email.is_none() && password.is_none() {
            return Err(CredentialError::invalid_request("email or password is required"));
        }
        if let Some(email) = &email {
            validate_email(email, "email")?;
        }
        if let Some(password) = &password {
            validate_password(password)?;
        }

        let password_hash = password.as_deref().map(hash_password).transpose()?;
        let email_verified = email.as_ref().map(|_| false);

        self.identity
            .update_user(
                uid,
                &IdentityUpdate {
                    email: email.clone(),
                    phone_number: None,
                    password,
                    email_verified,
                },
            )
            .await
            .map_err(|e| CredentialError::provider("failed to update credentials", e))?;

        self.mirror(
            uid,
            ProfileUpdate {
                email,
                is_email_verified: email_verified,
                password_hash,
                ..ProfileUpdate::default()
            },
        )
        .await;

        info!("Credentials changed for {}", uid);
        Ok(())
    }

    /// Set whether the authenticated subject requires a second factor
    pub async fn add_2fa(&self, uid: &str, request: Add2faRequest) -> CredentialResult<()> {
        let Some(is_2f_needed) = request.is_2f_needed else {
            return Err(CredentialError::validation(
                "is2FNeeded is required",
                "is2FNeeded",
            ));
        };

        let update = ProfileUpdate {
            is_2f_needed: Some(is_2f_needed),
            ..ProfileUpdate::default()
        };

        let matched = self
            .store
            .update(uid, &update)
            .await
            .map_err(|e| CredentialError::store("failed to update 2FA setting", e))?;

        if !matched {
            return Err(CredentialError::not_found("user profile not found"));
        }

        info!("2FA set to {} for {}", is_2f_needed, uid);
        Ok(())
    }

    /// Attach an email and/or phone number to the authenticated subject
    pub async fn add_other_credential(
        &self,
        uid: &str,
        request: AddOtherCredentialRequest,
    ) -> CredentialResult<()> {
        let email = present_email(request.email);
        let phone_number = present(request.phone);

        if email.is_none() && phone_number.is_none() {
            return Err(CredentialError::invalid_request("email or phone is required"));
        }
        if let Some(phone_number) = &phone_number {
            validate_phone_number(phone_number, "phone")?;
        }
        if let Some(email) = &email {
            validate_email(email, "email")?;
        }

        self.identity
            .update_user(
                uid,
                &IdentityUpdate {
                    email: email.clone(),
                    phone_number: phone_number.clone(),
                    password: None,
                    email_verified: email.as_ref().map(|_| false),
                },
            )
            .await
            .map_err(|e| CredentialError::provider("failed to add credential", e))?;

        self.mirror(
            uid,
            ProfileUpdate {
                is_email_verified: email.as_ref().map(|_| false),
                is_phone_verified: phone_number.as_ref().map(|_| false),
                email,
                phone_number,
                ..ProfileUpdate::default()
            },
        )
        .await;

        info!("Credential added for {}", uid);
        Ok(())
    }

    async fn find_by_identifier(&self, raw: &str) -> CredentialResult<Option<UserProfile>> {
        let identifier = Identifier::classify(raw);

        let found = match &identifier {
            Identifier::Phone(phone_number) => self.store.find_by_phone(phone_number).await,
            Identifier::Email(email) => self.store.find_by_email(&email.to_lowercase()).await,
        };

        found.map_err(|e| CredentialError::store("failed to look up user profile", e))
    }

    /// Best-effort copy of a provider-side change into the profile store
    async fn mirror(&self, uid: &str, update: ProfileUpdate) {
        match self.store.update(uid, &update).await {
            Ok(true) => {}
            Ok(false) => warn!("Profile mirror for {} matched no profile", uid),
            Err(e) => warn!("Profile mirror for {} failed: {}", uid, e),
        }
    }
}
