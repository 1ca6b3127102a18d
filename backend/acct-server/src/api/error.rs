//! REST API error types
//!
//! Every failure leaves the service as
//! `{"error": {"code": "...", "message": "...", "field": "..."}}`
//! with the status code of its category.

use crate::CredentialError;

use acct_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request field the error refers to, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Missing or rejected credentials (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Identity provider failure (500)
    #[error("Identity provider error: {message} {location}")]
    Provider {
        message: String,
        location: ErrorLocation,
    },

    /// Profile store failure (500)
    #[error("Profile store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Provider { .. } | ApiError::Store { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Provider { .. } => "PROVIDER_ERROR",
            ApiError::Store { .. } => "STORE_ERROR",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error with location for debugging
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let code = self.code().to_string();
        let body = match self {
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code,
                message,
                field,
            },
            ApiError::Unauthorized { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Provider { message, .. }
            | ApiError::Store { message, .. }
            | ApiError::Internal { message, .. } => ApiErrorBody {
                code,
                message,
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<CredentialError> for ApiError {
    #[track_caller]
    fn from(e: CredentialError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            CredentialError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            CredentialError::Unauthenticated { message, .. } => {
                ApiError::Unauthorized { message, location }
            }
            CredentialError::NotFound { message, .. } => ApiError::NotFound { message, location },
            CredentialError::Provider {
                message, source, ..
            } => {
                log::error!("Identity provider failure: {}", source);
                // The provider's reason code (e.g. EMAIL_EXISTS) is safe to pass on
                let message = match source.provider_message() {
                    Some(reason) => format!("{}: {}", message, reason),
                    None => message,
                };
                ApiError::Provider { message, location }
            }
            CredentialError::Store { message, source, .. } => {
                // Don't expose internal database details to clients
                log::error!("Profile store failure: {}", source);
                ApiError::Store { message, location }
            }
            CredentialError::Internal { message, .. } => {
                log::error!("Credential flow failure: {}", message);
                ApiError::Internal {
                    message: "internal server error".to_string(),
                    location,
                }
            }
        }
    }
}

/// Request gate failures are all 401
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        log::debug!("Rejected request: {}", e);
        ApiError::Unauthorized {
            message: e.client_message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Undecodable request bodies are validation errors
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message: rejection.body_text(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
