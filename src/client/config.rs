//! Declarative client configuration (JSON file or environment variables).

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

pub const ENV_USERNAME: &str = "MESSENTE_USERNAME";
pub const ENV_PASSWORD: &str = "MESSENTE_PASSWORD";
pub const ENV_USE_BACKUP_API: &str = "MESSENTE_USE_BACKUP_API";
pub const ENV_PRIMARY_URL: &str = "MESSENTE_PRIMARY_URL";
pub const ENV_BACKUP_URL: &str = "MESSENTE_BACKUP_URL";
pub const ENV_TIMEOUT_SECS: &str = "MESSENTE_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
/// Errors raised while loading a [`ClientConfig`].
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment variable {name} is required")]
    MissingEnv { name: &'static str },

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
/// Settings needed to build a [`MessenteClient`](crate::MessenteClient).
///
/// ```json
/// { "username": "user", "password": "secret", "use_backup_api": false }
/// ```
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub use_backup_api: bool,
    #[serde(default)]
    pub primary_url: Option<String>,
    #[serde(default)]
    pub backup_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `MESSENTE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read `MESSENTE_*` variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnv { name });

        let use_backup_api = match lookup(ENV_USE_BACKUP_API) {
            Some(value) => parse_flag(ENV_USE_BACKUP_API, &value)?,
            None => false,
        };
        let timeout_secs = lookup(ENV_TIMEOUT_SECS)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidEnv {
                        name: ENV_TIMEOUT_SECS,
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            username: required(ENV_USERNAME)?,
            password: required(ENV_PASSWORD)?,
            use_backup_api,
            primary_url: lookup(ENV_PRIMARY_URL),
            backup_url: lookup(ENV_BACKUP_URL),
            timeout_secs,
            user_agent: None,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("use_backup_api", &self.use_backup_api)
            .field("primary_url", &self.primary_url)
            .field("backup_url", &self.backup_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_owned(),
        }),
    }
}
