use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, IdentityConfig, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config for the process.
    ///
    /// Loading order:
    /// 1. Read `.env` from the working directory if one exists
    /// 2. Check for ACCT_CONFIG_DIR env var, else use ./.acct/
    /// 3. Auto-create config directory if it doesn't exist
    /// 4. Load config.toml if it exists, else use defaults
    /// 5. Apply ACCT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        Self::load_dotenv()?;

        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// A missing .env is normal; a malformed one is not.
    fn load_dotenv() -> ConfigErrorResult<()> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(source) => Err(ConfigError::DotEnv { source }),
        }
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: ACCT_CONFIG_DIR env var > ./.acct/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.identity.validate()?;

        Ok(())
    }

    /// Connection string for the profile store.
    /// An explicit `database.url` wins; otherwise the named file inside the config dir.
    pub fn database_url(&self) -> ConfigErrorResult<String> {
        if let Some(url) = &self.database.url {
            return Ok(url.clone());
        }

        let path = Self::config_dir()?.join(&self.database.name);
        Ok(format!("sqlite://{}", path.display()))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);

        match &self.database.url {
            Some(_) => info!(
                "  database: <url> (max {} connections)",
                self.database.max_connections
            ),
            None => info!(
                "  database: {} (max {} connections)",
                self.database.name, self.database.max_connections
            ),
        }

        info!(
            "  auth: HS256 ({})",
            if self.auth.jwt_secret.is_some() {
                "secret set"
            } else {
                "secret missing"
            }
        );

        let identity_target = match (&self.identity.emulator_host, &self.identity.credentials_file)
        {
            (Some(host), _) => format!("emulator at {}", host),
            (None, Some(_)) => String::from("service account"),
            (None, None) => String::from("no credentials"),
        };
        info!(
            "  identity: {} ({})",
            self.identity.provider, identity_target
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("ACCT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("ACCT_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_option_string("ACCT_DATABASE_URL", &mut self.database.url);
        Self::apply_env_string("ACCT_DATABASE_NAME", &mut self.database.name);
        Self::apply_env_parse(
            "ACCT_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("ACCT_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);

        // Identity
        if let Ok(val) = std::env::var("ACCT_IDENTITY_PROVIDER") {
            match val.parse() {
                Ok(kind) => self.identity.provider = kind,
                Err(e) => warn!("Ignoring ACCT_IDENTITY_PROVIDER: {}", e),
            }
        }
        Self::apply_env_option_string(
            "ACCT_IDENTITY_CREDENTIALS_FILE",
            &mut self.identity.credentials_file,
        );
        Self::apply_env_option_string("ACCT_IDENTITY_PROJECT_ID", &mut self.identity.project_id);
        Self::apply_env_option_string(
            "ACCT_IDENTITY_EMULATOR_HOST",
            &mut self.identity.emulator_host,
        );
        Self::apply_env_string(
            "ACCT_IDENTITY_API_BASE_URL",
            &mut self.identity.api_base_url,
        );

        // Logging
        Self::apply_env_parse("ACCT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ACCT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ACCT_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
