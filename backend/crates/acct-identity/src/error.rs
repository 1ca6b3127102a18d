use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered and refused (e.g. EMAIL_EXISTS, USER_NOT_FOUND)
    #[error("Identity provider error: {message} (status: {status}) {location}")]
    Provider {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to read credentials file {path}: {message} {location}")]
    CredentialsFile {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to obtain access token: {message} {location}")]
    AccessToken {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn provider<S: Into<String>>(status: u16, message: S) -> Self {
        IdentityError::Provider {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn access_token<S: Into<String>>(message: S) -> Self {
        IdentityError::AccessToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Provider-side reason code, when the provider gave one
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            IdentityError::Provider { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IdentityError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
