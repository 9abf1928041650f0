//! Application state shared by the relay handlers.
//!
//! `AppState` is generic over the session factory so the router can be
//! exercised with an in-memory factory in tests; production pins it to
//! [`GeminiClient`].

use std::sync::Arc;

use supportline_core::prompt::SYSTEM_PROMPT;
use supportline_infra::gemini::GeminiClient;
use supportline_infra::secret::resolve_api_key;
use supportline_types::config::RelayConfig;

pub struct AppState<F> {
    /// Opens one remote session per request.
    pub sessions: Arc<F>,
    /// Instruction preamble sent at the start of every session.
    pub system_prompt: Arc<str>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            system_prompt: self.system_prompt.clone(),
        }
    }
}

impl<F> AppState<F> {
    pub fn new(sessions: F, system_prompt: &str) -> Self {
        Self {
            sessions: Arc::new(sessions),
            system_prompt: Arc::from(system_prompt),
        }
    }
}

impl AppState<GeminiClient> {
    /// Resolve the credential and build the Gemini-backed state.
    pub fn init(config: &RelayConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.api_key_env)?;
        let client = GeminiClient::from_config(config, api_key)?;
        tracing::info!(model = client.model(), "relay configured");

        let system_prompt = config.system_prompt.as_deref().unwrap_or(SYSTEM_PROMPT);
        Ok(Self::new(client, system_prompt))
    }
}
