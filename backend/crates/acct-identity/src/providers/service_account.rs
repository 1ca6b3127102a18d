use crate::{IdentityError, Result as IdentityErrorResult};

use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

const IDENTITY_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform \
                              https://www.googleapis.com/auth/identitytoolkit";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    String::from(DEFAULT_TOKEN_URI)
}

/// The fields of a Google service-account JSON key this service needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl ServiceAccountKey {
    #[track_caller]
    pub fn from_file(path: &Path) -> IdentityErrorResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| IdentityError::CredentialsFile {
                path: path.to_path_buf(),
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        serde_json::from_str(&contents).map_err(|e| IdentityError::CredentialsFile {
            path: path.to_path_buf(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// RS256-signed JWT assertion exchanged at `token_uri` for an access token
    #[track_caller]
    pub fn assertion(&self, now: DateTime<Utc>) -> IdentityErrorResult<String> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes()).map_err(|e| {
            IdentityError::access_token(format!("invalid service account private key: {}", e))
        })?;

        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: IDENTITY_SCOPE,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: (now + TimeDelta::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| IdentityError::access_token(format!("failed to sign assertion: {}", e)))
    }
}
