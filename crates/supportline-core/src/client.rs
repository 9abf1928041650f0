//! Chat client driver.
//!
//! `ChatClient` owns a [`Transcript`] and turns one `submit` into one network
//! call: the payload goes out through a [`TranscriptTransport`], and every
//! decoded chunk of the reply body is appended to the pending assistant turn
//! in arrival order. Renderers observe progress through the `on_update`
//! callback.

use std::future::Future;
use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tracing::warn;

use supportline_types::chat::Turn;
use supportline_types::error::StreamError;

use crate::decode::Utf8ChunkDecoder;
use crate::transcript::Transcript;

/// Raw body chunks of a relay response.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, StreamError>> + Send + 'static>>;

/// Posts a transcript to the relay endpoint and exposes the reply body.
pub trait TranscriptTransport: Send + Sync {
    fn post(
        &self,
        payload: &[Turn],
    ) -> impl Future<Output = Result<ChunkStream, StreamError>> + Send;
}

/// Result of a single [`ChatClient::submit`] call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// The reply streamed to completion.
    Completed,
    /// The request or the body read failed; the apology replaced the
    /// pending turn.
    Failed(StreamError),
}

pub struct ChatClient<T> {
    transport: T,
    transcript: Transcript,
}

impl<T: TranscriptTransport> ChatClient<T> {
    /// A client whose transcript starts with the greeting.
    pub fn new(transport: T) -> Self {
        Self::with_transcript(transport, Transcript::new())
    }

    pub fn with_transcript(transport: T, transcript: Transcript) -> Self {
        Self {
            transport,
            transcript,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Send `text` and stream the reply into the transcript.
    pub async fn submit<F>(&mut self, text: &str, mut on_update: F) -> SubmitOutcome
    where
        F: FnMut(&Transcript),
    {
        let Some(payload) = self.transcript.append_user_turn(text) else {
            return SubmitOutcome::Ignored;
        };
        on_update(&self.transcript);

        match self.stream_reply(&payload, &mut on_update).await {
            Ok(()) => SubmitOutcome::Completed,
            Err(err) => {
                warn!(error = %err, "error sending message");
                self.transcript.replace_last_with_error();
                on_update(&self.transcript);
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn stream_reply<F>(
        &mut self,
        payload: &[Turn],
        on_update: &mut F,
    ) -> Result<(), StreamError>
    where
        F: FnMut(&Transcript),
    {
        let mut chunks = self.transport.post(payload).await?;
        let mut decoder = Utf8ChunkDecoder::new();

        while let Some(chunk) = chunks.next().await {
            let text = decoder.decode(&chunk?);
            self.push_text(&text, on_update);
        }

        let rest = decoder.finish();
        self.push_text(&rest, on_update);
        Ok(())
    }

    fn push_text<F>(&mut self, text: &str, on_update: &mut F)
    where
        F: FnMut(&Transcript),
    {
        if !text.is_empty() {
            self.transcript.append_assistant_chunk(text);
            on_update(&self.transcript);
        }
    }
}
