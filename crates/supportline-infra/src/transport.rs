//! reqwest-backed [`TranscriptTransport`] for chat clients.
//!
//! Posts the transcript to `{endpoint}/api/chat` and exposes the response
//! body as a stream of raw byte chunks. The status code is not inspected: an
//! error response's body streams like any other.

use futures_util::StreamExt;
use tracing::debug;

use supportline_core::client::{ChunkStream, TranscriptTransport};
use supportline_types::chat::Turn;
use supportline_types::error::StreamError;

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// `endpoint` is the relay server's base URL, e.g. `http://127.0.0.1:3000`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/api/chat", endpoint.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TranscriptTransport for HttpTransport {
    async fn post(&self, payload: &[Turn]) -> Result<ChunkStream, StreamError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| StreamError::Request(e.to_string()))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "relay answered with an error status");
        }

        let chunks = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| StreamError::Body(e.to_string()))
        });
        Ok(Box::pin(chunks))
    }
}
