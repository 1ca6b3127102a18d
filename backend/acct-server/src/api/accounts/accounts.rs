//! Account REST API handlers
//!
//! Thin adapters: decode the body, hand it to the credential service, shape
//! the JSON reply.

use crate::{
    Add2faRequest, AddOtherCredentialRequest, ApiResult, AppState, ChangeEmailPasswordRequest,
    CreateNewPasswordRequest, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest,
    LoginResponse, MessageResponse, SignUpRequest, SignUpResponse, VerifyCredentialsRequest,
    VerifyCredentialsResponse,
};

use acct_auth::VerifiedSubject;

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};

// =============================================================================
// Public
// =============================================================================

/// POST /api/signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> ApiResult<Json<SignUpResponse>> {
    let Json(request) = payload?;
    let uid = state.credentials.sign_up(request).await?;

    Ok(Json(SignUpResponse {
        message: "signup successful".to_string(),
        uid,
    }))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let session = state.credentials.login(request).await?;

    Ok(Json(LoginResponse {
        message: "login successful".to_string(),
        uid: session.uid,
        token: session.token,
    }))
}

/// POST /api/guest-login
pub async fn guest_login(State(state): State<AppState>) -> ApiResult<Json<LoginResponse>> {
    let session = state.credentials.guest_login().await?;

    Ok(Json(LoginResponse {
        message: "guest login successful".to_string(),
        uid: session.uid,
        token: session.token,
    }))
}

/// POST /api/verify-credentials
pub async fn verify_credentials(
    State(state): State<AppState>,
    payload: Result<Json<VerifyCredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<VerifyCredentialsResponse>> {
    let Json(request) = payload?;
    let check = state.credentials.verify_credentials(request).await?;

    Ok(Json(VerifyCredentialsResponse {
        exists: check.exists,
        uid: check.uid,
    }))
}

/// POST /api/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<ForgotPasswordResponse>> {
    let Json(request) = payload?;
    let link = state.credentials.forgot_password(request).await?;

    Ok(Json(ForgotPasswordResponse {
        message: "password reset link generated".to_string(),
        link,
    }))
}

/// POST /api/create-new-password
pub async fn create_new_password(
    State(state): State<AppState>,
    payload: Result<Json<CreateNewPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state.credentials.create_new_password(request).await?;

    Ok(Json(MessageResponse::new("password updated successfully")))
}

// =============================================================================
// Authenticated
// =============================================================================

/// POST /api/change-email-password
pub async fn change_email_password(
    State(state): State<AppState>,
    Extension(subject): Extension<VerifiedSubject>,
    payload: Result<Json<ChangeEmailPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state
        .credentials
        .change_email_password(subject.uid(), request)
        .await?;

    Ok(Json(MessageResponse::new("credentials updated successfully")))
}

/// POST /api/add-2fa
pub async fn add_2fa(
    State(state): State<AppState>,
    Extension(subject): Extension<VerifiedSubject>,
    payload: Result<Json<Add2faRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state.credentials.add_2fa(subject.uid(), request).await?;

    Ok(Json(MessageResponse::new("2FA preference updated")))
}

/// POST /api/add-other-credential
pub async fn add_other_credential(
    State(state): State<AppState>,
    Extension(subject): Extension<VerifiedSubject>,
    payload: Result<Json<AddOtherCredentialRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state
        .credentials
        .add_other_credential(subject.uid(), request)
        .await?;

    Ok(Json(MessageResponse::new("credential added successfully")))
}
