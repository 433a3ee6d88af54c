//! Server Configuration
//!
//! Read once from the environment at startup; components receive it by
//! reference and never read the environment themselves.

use agent_core::provider::DEFAULT_MODEL;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Externally advertised base URL, published in the agent card
    pub server_url: String,

    /// Gemini credential; `None` downgrades to basic responses
    pub google_api_key: Option<String>,

    /// Gemini model name
    pub model: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8000,
        };
        let server_url = lookup("SERVER_URL").unwrap_or_else(|| format!("http://localhost:{port}/"));
        let google_api_key = lookup("GOOGLE_API_KEY").filter(|key| !key.trim().is_empty());
        let model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());

        Ok(Self {
            host,
            port,
            server_url,
            google_api_key,
            model,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.server_url, "http://localhost:8000/");
        assert_eq!(config.google_api_key, None);
        assert_eq!(config.model, "gemini-2.0-flash-exp");
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_url_follows_port() {
        let config = config_from(&[("PORT", "9100"), ("HOST", "127.0.0.1")]).unwrap();
        assert_eq!(config.server_url, "http://localhost:9100/");
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");

        let config = config_from(&[("PORT", "9100"), ("SERVER_URL", "https://agents.example.com/")]).unwrap();
        assert_eq!(config.server_url, "https://agents.example.com/");
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        assert_eq!(config_from(&[("GOOGLE_API_KEY", "  ")]).unwrap().google_api_key, None);
        assert_eq!(
            config_from(&[("GOOGLE_API_KEY", "abc")]).unwrap().google_api_key.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_invalid_port() {
        assert_eq!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort("eighty".into()))
        );
    }
}
