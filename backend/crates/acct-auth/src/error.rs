use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Covers bad signatures, foreign algorithms, undecodable payloads and
    /// expiry alike; callers cannot tell them apart.
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer <token>' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT encode failed: {source} {location}")]
    TokenEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::TokenEncode { .. } => "TOKEN_ENCODE_FAILED",
            Self::PasswordHash { .. } => "PASSWORD_HASH_FAILED",
        }
    }

    /// Message safe to hand back to a client
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "Invalid or expired token",
            Self::MissingHeader { .. } => "Authorization header missing",
            Self::InvalidScheme { .. } => "Invalid auth header format",
            Self::TokenEncode { .. } => "Failed to issue token",
            Self::PasswordHash { .. } => "Failed to process password",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
