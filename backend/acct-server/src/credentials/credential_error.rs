use acct_auth::AuthError;
use acct_core::CoreError;
use acct_db::DbError;
use acct_identity::IdentityError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure of a credential flow, classified by who is at fault
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("{message}: {source} {location}")]
    Provider {
        message: String,
        #[source]
        source: IdentityError,
        location: ErrorLocation,
    },

    #[error("{message}: {source} {location}")]
    Store {
        message: String,
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl CredentialError {
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: &str) -> Self {
        CredentialError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Validation failure not tied to a single field
    #[track_caller]
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        CredentialError::Validation {
            message: message.into(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Same answer for unknown account and wrong password
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        CredentialError::Unauthenticated {
            message: "invalid credentials".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        CredentialError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider<S: Into<String>>(message: S, source: IdentityError) -> Self {
        CredentialError::Provider {
            message: message.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn store<S: Into<String>>(message: S, source: DbError) -> Self {
        CredentialError::Store {
            message: message.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for CredentialError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        CredentialError::Validation {
            message: err.message(),
            field: err.field(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for CredentialError {
    #[track_caller]
    fn from(err: AuthError) -> Self {
        CredentialError::Internal {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CredentialError>;
