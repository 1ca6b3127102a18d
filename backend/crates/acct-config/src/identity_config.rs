use crate::{ConfigError, ConfigErrorResult, DEFAULT_IDENTITY_API_BASE_URL};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which Identity Provider backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProviderKind {
    #[default]
    Firebase,
    /// Process-local provider for development; identities vanish on restart
    Memory,
}

impl FromStr for IdentityProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::identity(format!(
                "identity.provider must be 'firebase' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IdentityProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firebase => write!(f, "firebase"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub provider: IdentityProviderKind,
    /// Service-account JSON file
    pub credentials_file: Option<String>,
    /// Overrides the project id found in the credentials file
    pub project_id: Option<String>,
    /// host:port of a local Auth emulator
    pub emulator_host: Option<String>,
    pub api_base_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider: IdentityProviderKind::default(),
            credentials_file: None,
            project_id: None,
            emulator_host: None,
            api_base_url: String::from(DEFAULT_IDENTITY_API_BASE_URL),
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.provider != IdentityProviderKind::Firebase {
            return Ok(());
        }

        if self.emulator_host.is_some() {
            if self.project_id.is_none() {
                return Err(ConfigError::identity(
                    "identity.project_id is required when identity.emulator_host is set",
                ));
            }
            return Ok(());
        }

        let Some(path) = &self.credentials_file else {
            return Err(ConfigError::identity(
                "identity.credentials_file is required for the firebase provider \
                 (or set identity.emulator_host)",
            ));
        };

        if !std::path::Path::new(path).exists() {
            return Err(ConfigError::identity(format!(
                "identity.credentials_file does not exist: {}",
                path
            )));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::identity(format!(
                "identity.api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        Ok(())
    }
}
