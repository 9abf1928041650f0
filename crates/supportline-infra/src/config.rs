//! Configuration loader for Supportline.
//!
//! Reads an optional `config.toml` and deserializes it into [`AppConfig`].
//! Falls back to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use supportline_types::config::AppConfig;

/// `{config_dir}/supportline/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("supportline").join("config.toml"))
}

/// Load configuration from `path`, or from [`default_config_path`] when
/// `path` is `None`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(path: Option<&Path>) -> AppConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return AppConfig::default(),
        },
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(Some(&tmp.path().join("config.toml"))).await;
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.relay.model, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[server]
host = "0.0.0.0"
port = 8088

[relay]
system_prompt = "Be brief."
api_key_env = "MY_KEY"
"#,
        )
        .await
        .unwrap();

        let config = load_config(Some(&config_path)).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.relay.system_prompt.as_deref(), Some("Be brief."));
        assert_eq!(config.relay.api_key_env, "MY_KEY");
        assert_eq!(config.client.endpoint, "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "[server\nport = ").await.unwrap();

        let config = load_config(Some(&config_path)).await;
        assert_eq!(config.server.port, 3000);
    }
}
