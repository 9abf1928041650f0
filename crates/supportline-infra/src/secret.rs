//! Credential resolution from the environment.
//!
//! The relay needs exactly one secret: the API key for the hosted
//! generative-language service. It is read from the environment variable
//! named in `relay.api_key_env` and wrapped in a [`SecretString`] so it never
//! shows up in `Debug` output or logs.

use secrecy::SecretString;

use supportline_types::error::ConfigError;

/// Read the API key from environment variable `var`.
///
/// Unset, empty, and non-Unicode values are all treated as missing.
pub fn resolve_api_key(var: &str) -> Result<SecretString, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(ConfigError::MissingCredential(var.to_string())),
    }
}
