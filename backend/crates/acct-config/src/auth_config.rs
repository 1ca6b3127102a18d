use crate::{ConfigError, ConfigErrorResult, MIN_JWT_SECRET_LENGTH};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for issued tokens
    pub jwt_secret: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let Some(secret) = &self.jwt_secret else {
            return Err(ConfigError::auth(
                "auth.jwt_secret is required (set ACCT_AUTH_JWT_SECRET)",
            ));
        };

        if secret.chars().count() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(())
    }

    /// Secret bytes; empty when unset (validate() rejects that case)
    pub fn secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_deref().unwrap_or_default().as_bytes()
    }
}
