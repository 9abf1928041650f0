//! Remote chat session ports.
//!
//! A `ChatSession` is an opaque, per-request handle to the hosted chat
//! service: "send message, await full text". Sessions are never shared or
//! reused across requests; a `SessionFactory` opens a fresh one every time.
//!
//! Both traits use native async fn in traits (RPITIT). Implementations live
//! in supportline-infra (e.g., `GeminiClient`).

use std::future::Future;

use supportline_types::error::UpstreamError;

/// A live conversation with the hosted service.
pub trait ChatSession: Send {
    /// Send one message and wait for the complete textual reply.
    fn send(
        &mut self,
        text: &str,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// Opens new remote sessions seeded with a single user message as history.
pub trait SessionFactory: Send + Sync {
    type Session: ChatSession + 'static;

    fn open(&self, seed: &str) -> Self::Session;
}
