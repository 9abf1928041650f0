//! GeminiClient -- concrete [`SessionFactory`] for the Gemini API.
//!
//! Every session keeps its own conversation history locally and sends the
//! whole history with each `generateContent` call, so a session is cheap to
//! open and is simply dropped at the end of the request.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, debug, info_span};

use supportline_core::session::{ChatSession, SessionFactory};
use supportline_types::config::RelayConfig;
use supportline_types::error::UpstreamError;

use super::types::{GeminiContent, GenerateContentRequest, GenerateContentResponse};

/// Shared HTTP state; one per process, borrowed by every session.
struct GeminiHttp {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

/// Gemini session factory.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    http: Arc<GeminiHttp>,
}

impl GeminiClient {
    /// Create a client for `model` at `base_url`.
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| UpstreamError::Http {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http: Arc::new(GeminiHttp {
                client,
                api_key,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                model: model.into(),
            }),
        })
    }

    pub fn from_config(config: &RelayConfig, api_key: SecretString) -> Result<Self, UpstreamError> {
        Self::new(api_key, config.model.clone(), config.base_url.clone())
    }

    pub fn model(&self) -> &str {
        &self.http.model
    }
}

impl GeminiHttp {
    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, contents: &[GeminiContent]) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&GenerateContentRequest { contents })
            .send()
            .await
            .map_err(|e| UpstreamError::Http {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => UpstreamError::AuthenticationFailed,
                429 => UpstreamError::RateLimited,
                code => UpstreamError::Status { status: code, body },
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            UpstreamError::UnexpectedShape(format!("failed to parse response: {e}"))
        })?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                gen_ai.usage.input_tokens = usage.prompt_token_count,
                gen_ai.usage.output_tokens = usage.candidates_token_count,
                "generateContent usage"
            );
        }

        parsed.into_text()
    }
}

impl SessionFactory for GeminiClient {
    type Session = GeminiChatSession;

    fn open(&self, seed: &str) -> GeminiChatSession {
        GeminiChatSession {
            http: self.http.clone(),
            history: vec![GeminiContent::user(seed)],
        }
    }
}

/// One request's conversation with Gemini.
pub struct GeminiChatSession {
    http: Arc<GeminiHttp>,
    history: Vec<GeminiContent>,
}

impl GeminiChatSession {
    pub fn history(&self) -> &[GeminiContent] {
        &self.history
    }
}

impl ChatSession for GeminiChatSession {
    /// Send `text` with the full history. History only grows when the call
    /// succeeds.
    async fn send(&mut self, text: &str) -> Result<String, UpstreamError> {
        let span = info_span!(
            "gen_ai.chat",
            otel.name = %format!("chat {}", self.http.model),
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = "gemini",
            gen_ai.request.model = %self.http.model,
            history = self.history.len(),
        );

        let mut contents = self.history.clone();
        contents.push(GeminiContent::user(text));

        let reply = self.http.generate(&contents).instrument(span).await?;

        contents.push(GeminiContent::model(&reply));
        self.history = contents;
        Ok(reply)
    }
}
