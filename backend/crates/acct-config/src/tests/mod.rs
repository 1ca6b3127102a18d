
use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

const OVERRIDE_VARS: [&str; 14] = [
    "ACCT_SERVER_HOST",
    "ACCT_SERVER_PORT",
    "ACCT_DATABASE_URL",
    "ACCT_DATABASE_NAME",
    "ACCT_DATABASE_MAX_CONNECTIONS",
    "ACCT_AUTH_JWT_SECRET",
    "ACCT_IDENTITY_PROVIDER",
    "ACCT_IDENTITY_CREDENTIALS_FILE",
    "ACCT_IDENTITY_PROJECT_ID",
    "ACCT_IDENTITY_EMULATOR_HOST",
    "ACCT_IDENTITY_API_BASE_URL",
    "ACCT_LOG_LEVEL",
    "ACCT_LOG_COLORED",
    "ACCT_LOG_FILE",
];

/// Temp config dir plus a clean ACCT_* environment
pub(crate) struct TestEnv {
    pub(crate) dir: TempDir,
    _guards: Vec<EnvGuard>,
}

impl TestEnv {
    pub(crate) fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join("config.toml"), contents).unwrap();
    }
}

pub(crate) fn setup_config_dir() -> TestEnv {
    let dir = TempDir::new().unwrap();
    let mut guards: Vec<EnvGuard> = OVERRIDE_VARS.into_iter().map(EnvGuard::remove).collect();
    guards.push(EnvGuard::set("ACCT_CONFIG_DIR", dir.path().to_str().unwrap()));
    TestEnv {
        dir,
        _guards: guards,
    }
}

/// Config dir whose settings pass validate() with the in-memory provider
pub(crate) fn setup_valid_config_dir() -> TestEnv {
    let env = setup_config_dir();
    env.write_config(
        r#"
            [auth]
            jwt_secret = "12345678901234567890123456789012"

            [identity]
            provider = "memory"
        "#,
    );
    env
}
