//! Service configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{RelayError, Result};

/// Characters that would turn `API_HOST` into a path, query, fragment or userinfo.
const HOST_DELIMITERS: &[char] = &['/', '?', '#', '@'];

/// Service configuration loaded from environment variables.
///
/// Both services read the same struct; the API service only uses the
/// server fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Port the running service listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Upstream (App service only) ===
    /// Host of the API service.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Port of the API service.
    #[serde(default = "default_port")]
    pub api_port: u16,

    /// Deadline for the whole heartbeat call, in milliseconds.
    #[serde(default = "default_api_timeout_ms")]
    pub api_timeout_ms: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_port() -> u16 {
    3000
}

fn default_api_host() -> String {
    "api".to_string()
}

fn default_api_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            api_host: default_api_host(),
            api_port: default_port(),
            api_timeout_ms: default_api_timeout_ms(),
            rust_log: default_log_level(),
            verbose: false,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> std::result::Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Build configuration from explicit key/value pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> std::result::Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.api_host.trim().is_empty() {
            return Err("API_HOST must not be empty".to_string());
        }

        if self.api_host.contains(HOST_DELIMITERS) || self.api_host.contains(char::is_whitespace) {
            return Err(format!(
                "API_HOST {:?} must be a bare host name or address",
                self.api_host
            ));
        }

        if self.api_port == 0 {
            return Err("API_PORT must be greater than 0".to_string());
        }

        if self.api_timeout_ms == 0 {
            return Err("API_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Outbound heartbeat URL: `http://<api_host>:<api_port>/heartbeat`.
    pub fn heartbeat_url(&self) -> Result<Url> {
        if self.api_host.contains(HOST_DELIMITERS) {
            return Err(RelayError::InvalidConfig(format!(
                "API_HOST {:?} is not a valid host",
                self.api_host
            )));
        }

        let mut url = Url::parse("http://localhost/heartbeat")?;
        url.set_host(Some(self.api_host.as_str()))?;
        url.set_port(Some(self.api_port)).map_err(|()| {
            RelayError::InvalidConfig(format!("API_PORT {} cannot be used", self.api_port))
        })?;
        Ok(url)
    }

    /// Heartbeat call deadline.
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }
}
