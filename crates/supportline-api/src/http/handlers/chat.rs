//! Streaming relay endpoint.
//!
//! POST /api/chat
//!
//! Body: JSON array of `{ role, content }` turns. The reply is a
//! `text/plain` body made of each replayed turn's answer, concatenated with
//! no separator, written as each remote call completes. Failures before the
//! first byte answer 500; a failure mid-stream is logged and aborts the body.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

use supportline_core::relay::relay;
use supportline_core::session::SessionFactory;
use supportline_types::chat::Turn;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat -- replay the transcript and stream the replies.
pub async fn relay_chat<F>(
    State(state): State<AppState<F>>,
    body: Bytes,
) -> Result<Response, AppError>
where
    F: SessionFactory + 'static,
{
    let request_id = Uuid::now_v7();
    let span = info_span!("relay_chat", %request_id);

    async move {
        let transcript: Vec<Turn> =
            serde_json::from_slice(&body).map_err(AppError::MalformedBody)?;

        let replies = relay(state.sessions.as_ref(), &transcript, &state.system_prompt).await?;

        let body = replies.map(move |reply| {
            reply.inspect_err(|e| error!(%request_id, error = %e, "error during processing"))
        });

        Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], Body::from_stream(body)).into_response())
    }
    .instrument(span)
    .await
}
