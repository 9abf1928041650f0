//! Configuration types for Supportline.
//!
//! `AppConfig` is the shape of the optional `config.toml`. Every field has a
//! default, so an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Where the relay endpoint listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// How the relay reaches the hosted generative-language service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Model identifier (e.g., "gemini-1.5-flash").
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Replaces the built-in instruction preamble when set.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            system_prompt: None,
        }
    }
}

/// Settings for the terminal chat client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of a running relay server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:3000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.relay.model, "gemini-1.5-flash");
        assert_eq!(config.relay.api_key_env, "GEMINI_API_KEY");
        assert!(config.relay.system_prompt.is_none());
        assert_eq!(config.client.endpoint, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[server]
port = 8080

[relay]
model = "gemini-2.0-flash"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.relay.model, "gemini-2.0-flash");
        assert_eq!(
            config.relay.base_url,
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
