use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_NAME,
    MAX_DATABASE_MAX_CONNECTIONS, MIN_DATABASE_MAX_CONNECTIONS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over `name`
    pub url: Option<String>,
    /// Database file name, resolved inside the config directory
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: String::from(DEFAULT_DATABASE_NAME),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.url.is_none() {
            if self.name.trim().is_empty() {
                return Err(ConfigError::database("database.name cannot be empty"));
            }

            let name_path = std::path::Path::new(&self.name);
            if name_path.is_absolute() || self.name.contains("..") {
                return Err(ConfigError::database(
                    "database.name must be relative and cannot contain '..'",
                ));
            }
        }

        if self
            .url
            .as_deref()
            .is_some_and(|url| !url.starts_with("sqlite:"))
        {
            return Err(ConfigError::database(
                "database.url must be a sqlite: connection string",
            ));
        }

        if self.max_connections < MIN_DATABASE_MAX_CONNECTIONS
            || self.max_connections > MAX_DATABASE_MAX_CONNECTIONS
        {
            return Err(ConfigError::database(format!(
                "database.max_connections must be {}-{}, got {}",
                MIN_DATABASE_MAX_CONNECTIONS, MAX_DATABASE_MAX_CONNECTIONS, self.max_connections
            )));
        }

        Ok(())
    }
}
