use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use chrono::{DateTime, TimeDelta, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// JWT claims - subject plus validity window, nothing else
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (provider-assigned uid)
    pub sub: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: &str, issued_at: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Validate claims after signature verification, against `now`
    #[track_caller]
    pub fn validate(&self, now: DateTime<Utc>) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidToken {
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if now.timestamp() > self.exp {
            return Err(AuthError::InvalidToken {
                message: "token expired".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
