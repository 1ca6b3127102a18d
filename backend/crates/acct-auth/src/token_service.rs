use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use chrono::{DateTime, TimeDelta, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Lifetime of an issued token
pub const TOKEN_TTL_HOURS: i64 = 72;

/// Issues and verifies HS256 identity tokens.
///
/// Built once at startup from the configured secret and shared read-only
/// for the life of the process.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenService {
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // exp is compared against the caller's clock in verify_at()
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issue a token for `subject`, valid for 72 hours from now
    #[track_caller]
    pub fn issue(&self, subject: &str) -> AuthErrorResult<String> {
        self.issue_at(subject, Utc::now())
    }

    #[track_caller]
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> AuthErrorResult<String> {
        let claims = Claims::new(subject, now, self.ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|source| {
            AuthError::TokenEncode {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify a token and return its subject
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<String> {
        self.verify_at(token, Utc::now())
    }

    #[track_caller]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthErrorResult<String> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                AuthError::InvalidToken {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        token_data.claims.validate(now)?;

        Ok(token_data.claims.sub)
    }

    /// Algorithm family for logging: HMAC accepted, HS256 issued
    pub fn algorithm(&self) -> &'static str {
        "HMAC (HS256 issue)"
    }
}
