//! HTTP server configuration loaded from the environment

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Server configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used
    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Upper bound on the time spent handling a single request
    pub request_timeout: Duration,
    /// Deployment environment name, reported by `/status`
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            environment: "development".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(host) = var("HOST") {
            config.host = host;
        }

        if let Some(value) = var("PORT") {
            config.port = parse_var("PORT", value)?;
        }

        if let Some(value) = var("REQUEST_TIMEOUT_SECONDS") {
            let seconds: u64 = parse_var("REQUEST_TIMEOUT_SECONDS", value)?;
            config.request_timeout = Duration::from_secs(seconds);
        }

        if let Some(environment) = var("APP_ENV") {
            config.environment = environment;
        }

        Ok(config)
    }

    /// Address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}
