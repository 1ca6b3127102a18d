use crate::PasswordRule;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Password policy violation: {rule} {location}")]
    PolicyViolation {
        rule: PasswordRule,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error, optionally tied to a request field
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        CoreError::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Client-facing message (no source location)
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::PolicyViolation { rule, .. } => rule.to_string(),
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => field.clone(),
            Self::PolicyViolation { .. } => Some("password".to_string()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
