use crate::{ApiError, CredentialError};

use acct_auth::AuthError;
use acct_identity::IdentityError;

use std::panic::Location;

use axum::{http::StatusCode, response::IntoResponse};
use error_location::ErrorLocation;
use googletest::prelude::*;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_with_field_when_rendered_then_400_with_field() {
    let error = ApiError::Validation {
        message: "invalid email address format".into(),
        field: Some("email".into()),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "invalid email address format");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn given_validation_error_without_field_when_rendered_then_field_is_omitted() {
    let error = ApiError::Validation {
        message: "email or phone number is required".into(),
        field: None,
        location: ErrorLocation::from(Location::caller()),
    };

    let (_, json) = body_json(error).await;

    assert_that!(json["error"].get("field"), none());
}

#[tokio::test]
async fn given_unauthorized_when_rendered_then_401() {
    let error = ApiError::Unauthorized {
        message: "Invalid or expired token".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["error"]["message"], "Invalid or expired token");
}

#[test]
fn given_credential_errors_when_converted_then_status_follows_category() {
    let cases = [
        (
            CredentialError::invalid_request("email or password is required"),
            StatusCode::BAD_REQUEST,
        ),
        (CredentialError::invalid_credentials(), StatusCode::UNAUTHORIZED),
        (
            CredentialError::not_found("user profile not found"),
            StatusCode::NOT_FOUND,
        ),
        (
            CredentialError::provider(
                "failed to create user in identity provider",
                IdentityError::provider(400, "EMAIL_EXISTS"),
            ),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(ApiError::from(error).status(), expected);
    }
}

#[tokio::test]
async fn given_provider_error_with_reason_when_rendered_then_reason_is_appended() {
    let error = ApiError::from(CredentialError::provider(
        "failed to create user in identity provider",
        IdentityError::provider(400, "EMAIL_EXISTS"),
    ));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "PROVIDER_ERROR");
    assert_eq!(
        json["error"]["message"],
        "failed to create user in identity provider: EMAIL_EXISTS"
    );
}

#[tokio::test]
async fn given_internal_credential_error_when_rendered_then_details_are_hidden() {
    let error = ApiError::from(CredentialError::from(AuthError::PasswordHash {
        message: "salt generation failed".into(),
        location: ErrorLocation::from(Location::caller()),
    }));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "internal server error");
}

#[test]
fn given_auth_error_when_converted_then_unauthorized_with_client_message() {
    let error = ApiError::from(AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    });

    assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error.code(), "UNAUTHORIZED");
}
