//! Environment configuration

use thiserror::Error;

/// Port the server listens on when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3001;

/// Errors raised while reading the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project URL of the hosted record store
    pub store_url: String,
    /// Access key for the hosted record store
    pub store_key: String,
    pub port: u16,
}

impl Config {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let store_url = required("SUPABASE_URL")?;
        let store_key = required("SUPABASE_KEY")?;

        let port = match lookup("PORT").filter(|value| !value.trim().is_empty()) {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            store_url,
            store_key,
            port,
        })
    }
}
