use std::env;
use std::net::{IpAddr, SocketAddr};

use tracing::warn;

use crate::errors::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_FALLBACK_MODELS: [&str; 2] = ["gemini-1.5-flash", "gemini-1.0-pro"];
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_fallback_models: Vec<String>,
    pub gemini_api_base: String,
    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                                     |
    /// |--------------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`         | unset (warns, calls fail later)             |
    /// | `GEMINI_MODEL`           | `gemini-1.5-pro`                            |
    /// | `GEMINI_FALLBACK_MODELS` | `gemini-1.5-flash,gemini-1.0-pro`           |
    /// | `GEMINI_API_BASE`        | `https://generativelanguage.googleapis.com` |
    /// | `HOST`                   | `0.0.0.0`                                   |
    /// | `PORT`                   | `8000`                                      |
    ///
    /// # Errors
    ///
    /// Returns an error if `HOST` or `PORT` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = non_empty_var("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; summarization requests will fail");
        }

        let gemini_fallback_models = non_empty_var("GEMINI_FALLBACK_MODELS")
            .map(|s| parse_model_list(&s))
            .unwrap_or_else(|| {
                DEFAULT_FALLBACK_MODELS
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect()
            });

        let host_raw = non_empty_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let host = host_raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "HOST",
            expected: "IP address",
            value: host_raw.clone(),
        })?;

        let port_raw = non_empty_var("PORT").unwrap_or_else(|| "8000".to_string());
        let port = port_raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "PORT",
            expected: "port number",
            value: port_raw.clone(),
        })?;

        Ok(Self {
            gemini_api_key,
            gemini_model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_fallback_models,
            gemini_api_base: non_empty_var("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            host,
            port,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Split a comma-separated list of model names, dropping blanks.
#[must_use]
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
