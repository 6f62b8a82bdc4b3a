/// InfluxDB connection settings loaded from the environment.
///
/// All four variables are required. A `.env` file in the working directory
/// is loaded first if present; variables already set in the environment win.

use std::env;

pub const ENV_INFLUX_HOST: &str = "INFLUX_HOST";
pub const ENV_INFLUX_TOKEN: &str = "INFLUX_TOKEN";
pub const ENV_INFLUX_ORG: &str = "INFLUX_ORG";
pub const ENV_INFLUX_BUCKET: &str = "INFLUX_BUCKET";

/// Configuration error raised at startup
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Required variable unset or empty
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => {
                write!(f, "Missing required environment variable: {}", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where and as whom to write points
#[derive(Debug, Clone, PartialEq)]
pub struct InfluxConfig {
    pub host: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

impl InfluxConfig {
    /// Load from the process environment (plus `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Variables are checked in a fixed
    /// order and the first missing one is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(ConfigError::Missing(key)),
            }
        };

        Ok(InfluxConfig {
            host: require(ENV_INFLUX_HOST)?,
            token: require(ENV_INFLUX_TOKEN)?,
            org: require(ENV_INFLUX_ORG)?,
            bucket: require(ENV_INFLUX_BUCKET)?,
        })
    }
}
