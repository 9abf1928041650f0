//! Stateless transcript relay.
//!
//! Every request carries the whole transcript. The relay opens a new remote
//! session seeded with the first user turn, sends the instruction preamble,
//! then replays the user turns of `transcript[1..]` one at a time, yielding
//! each reply as soon as it arrives. Assistant turns are never replayed, so
//! the remote model does not see earlier replies from previous requests.
//!
//! The exchange runs on its own task and hands replies over a channel. When
//! the reader goes away the remote call in flight still completes, but no
//! further call is issued.

use std::pin::Pin;

use futures_util::Stream;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use supportline_types::chat::Turn;
use supportline_types::error::{RelayError, UpstreamError};

use crate::session::{ChatSession, SessionFactory};

/// Replies buffered between the replay task and the reader.
const REPLY_BUFFER: usize = 16;

/// Reply text chunks, one per replayed user turn, in transcript order.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String, UpstreamError>> + Send + 'static>>;

/// What a transcript turns into on the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayPlan {
    /// Content of the first user turn, used as the session's seed history.
    pub seed: String,
    /// User messages sent after the preamble, in order.
    pub messages: Vec<String>,
}

impl ReplayPlan {
    /// Derive the plan from a client transcript.
    ///
    /// Fails with [`RelayError::Validation`] when no turn has role `user`.
    /// The replay tail starts at index 1 regardless of where the first user
    /// turn sits, and keeps only user turns.
    pub fn from_transcript(transcript: &[Turn]) -> Result<Self, RelayError> {
        let seed = transcript
            .iter()
            .find(|turn| turn.is_user())
            .ok_or_else(|| RelayError::Validation("no initial user message found".to_string()))?
            .content
            .clone();

        let messages = transcript
            .iter()
            .skip(1)
            .filter(|turn| turn.is_user())
            .map(|turn| turn.content.clone())
            .collect();

        Ok(Self { seed, messages })
    }
}

/// Relay a transcript through a freshly opened remote session.
///
/// Validation and the preamble exchange complete before this returns, so
/// their failures surface as `Err` before any reply byte exists. The
/// returned stream issues one remote call per replayed message, each awaited
/// before the next, and ends after the first upstream error. Must be called
/// inside a Tokio runtime.
pub async fn relay<F: SessionFactory>(
    factory: &F,
    transcript: &[Turn],
    system_prompt: &str,
) -> Result<ReplyStream, RelayError> {
    let plan = ReplayPlan::from_transcript(transcript)?;
    info!(
        turns = transcript.len(),
        replayed = plan.messages.len(),
        "relaying transcript"
    );

    let session = factory.open(&plan.seed);
    let (ready_tx, ready_rx) = oneshot::channel();
    let (reply_tx, mut reply_rx) = mpsc::channel(REPLY_BUFFER);

    tokio::spawn(replay(
        session,
        system_prompt.to_string(),
        plan.messages,
        ready_tx,
        reply_tx,
    ));

    ready_rx.await.map_err(|_| UpstreamError::Http {
        message: "relay task ended before the preamble completed".to_string(),
    })??;

    let stream = async_stream::stream! {
        while let Some(reply) = reply_rx.recv().await {
            yield reply;
        }
    };

    Ok(Box::pin(stream))
}

async fn replay<S: ChatSession>(
    mut session: S,
    system_prompt: String,
    messages: Vec<String>,
    ready: oneshot::Sender<Result<(), UpstreamError>>,
    replies: mpsc::Sender<Result<String, UpstreamError>>,
) {
    debug!("sending instruction preamble");
    let preamble = session.send(&system_prompt).await.map(|_| ());
    let accepted = preamble.is_ok();
    if ready.send(preamble).is_err() || !accepted {
        return;
    }

    for (index, message) in messages.into_iter().enumerate() {
        debug!(index, "sending user message");
        let reply = session.send(&message).await;
        let failed = reply.is_err();
        if let Ok(text) = &reply {
            debug!(index, bytes = text.len(), "received reply");
        }
        if replies.send(reply).await.is_err() {
            debug!(index, "reader dropped, stopping replay");
            return;
        }
        if failed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use futures_util::StreamExt;

    use super::*;

    /// Records every call as `(seed, message)` and answers `re:{message}`.
    #[derive(Clone, Default)]
    struct RecordingFactory {
        calls: Arc<Mutex<Vec<(String, String)>>>,
        fail_on: Option<String>,
    }

    struct RecordingSession {
        seed: String,
        calls: Arc<Mutex<Vec<(String, String)>>>,
        fail_on: Option<String>,
    }

    impl ChatSession for RecordingSession {
        async fn send(&mut self, text: &str) -> Result<String, UpstreamError> {
            self.calls
                .lock()
                .unwrap()
                .push((self.seed.clone(), text.to_string()));
            if self.fail_on.as_deref() == Some(text) {
                return Err(UpstreamError::UnexpectedShape("no candidates".to_string()));
            }
            Ok(format!("re:{text}"))
        }
    }

    impl SessionFactory for RecordingFactory {
        type Session = RecordingSession;

        fn open(&self, seed: &str) -> RecordingSession {
            RecordingSession {
                seed: seed.to_string(),
                calls: self.calls.clone(),
                fail_on: self.fail_on.clone(),
            }
        }
    }

    impl RecordingFactory {
        fn failing_on(text: &str) -> Self {
            Self {
                fail_on: Some(text.to_string()),
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    async fn collect(stream: ReplyStream) -> Vec<Result<String, UpstreamError>> {
        stream.collect().await
    }

    #[test]
    fn test_plan_requires_user_turn() {
        let err = ReplayPlan::from_transcript(&[Turn::assistant("Hi")]).unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));

        let err = ReplayPlan::from_transcript(&[]).unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
    }

    #[test]
    fn test_plan_tail_starts_at_second_turn() {
        let plan = ReplayPlan::from_transcript(&[
            Turn::assistant("Hi"),
            Turn::user("first"),
            Turn::assistant("answer"),
            Turn::user("second"),
        ])
        .unwrap();
        assert_eq!(plan.seed, "first");
        assert_eq!(plan.messages, vec!["first", "second"]);

        let plan = ReplayPlan::from_transcript(&[Turn::user("hi"), Turn::user("how are you")])
            .unwrap();
        assert_eq!(plan.seed, "hi");
        assert_eq!(plan.messages, vec!["how are you"]);
    }

    #[tokio::test]
    async fn test_no_user_turn_makes_no_remote_calls() {
        let factory = RecordingFactory::default();
        let result = relay(&factory, &[Turn::assistant("Hi")], "PROMPT").await;
        assert!(matches!(result, Err(RelayError::Validation(_))));
        assert!(factory.sent().is_empty());
    }

    #[tokio::test]
    async fn test_single_user_turn_sends_only_preamble() {
        let factory = RecordingFactory::default();
        let stream = relay(&factory, &[Turn::user("hi")], "PROMPT").await.unwrap();
        let replies = collect(stream).await;

        assert!(replies.is_empty());
        assert_eq!(factory.sent(), vec!["PROMPT"]);
        assert_eq!(factory.calls.lock().unwrap()[0].0, "hi");
    }

    #[tokio::test]
    async fn test_replies_follow_transcript_order_and_skip_assistant_turns() {
        let factory = RecordingFactory::default();
        let transcript = vec![
            Turn::assistant("Hi, how can I help?"),
            Turn::user("one"),
            Turn::assistant("reply one"),
            Turn::user("two"),
            Turn::assistant("..."),
        ];
        let stream = relay(&factory, &transcript, "PROMPT").await.unwrap();
        let replies: Vec<String> = collect(stream)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        assert_eq!(replies, vec!["re:one", "re:two"]);
        assert_eq!(factory.sent(), vec!["PROMPT", "one", "two"]);
    }

    #[tokio::test]
    async fn test_preamble_failure_is_reported_before_streaming() {
        let factory = RecordingFactory::failing_on("PROMPT");
        let result = relay(&factory, &[Turn::user("hi"), Turn::user("x")], "PROMPT").await;
        assert!(matches!(result, Err(RelayError::Upstream(_))));
        assert_eq!(factory.sent(), vec!["PROMPT"]);
    }

    #[tokio::test]
    async fn test_stream_stops_at_first_upstream_error() {
        let factory = RecordingFactory::failing_on("two");
        let transcript = vec![
            Turn::user("seed"),
            Turn::user("one"),
            Turn::user("two"),
            Turn::user("three"),
        ];
        let stream = relay(&factory, &transcript, "PROMPT").await.unwrap();
        let replies = collect(stream).await;

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].as_ref().unwrap(), "re:one");
        assert!(replies[1].is_err());
        assert_eq!(factory.sent(), vec!["PROMPT", "one", "two"]);
    }

    #[tokio::test]
    async fn test_each_request_opens_a_new_session() {
        let factory = RecordingFactory::default();
        let first = relay(&factory, &[Turn::user("a")], "P").await.unwrap();
        collect(first).await;
        let second = relay(&factory, &[Turn::user("b")], "P").await.unwrap();
        collect(second).await;

        let seeds: Vec<String> = factory
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(seed, _)| seed.clone())
            .collect();
        assert_eq!(seeds, vec!["a", "b"]);
    }

    /// Answers after a delay and records each completed call.
    #[derive(Clone, Default)]
    struct SlowFactory {
        completed: Arc<Mutex<Vec<String>>>,
    }

    struct SlowSession {
        completed: Arc<Mutex<Vec<String>>>,
    }

    impl ChatSession for SlowSession {
        async fn send(&mut self, text: &str) -> Result<String, UpstreamError> {
            if text != "PROMPT" {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            self.completed.lock().unwrap().push(text.to_string());
            Ok(format!("re:{text}"))
        }
    }

    impl SessionFactory for SlowFactory {
        type Session = SlowSession;

        fn open(&self, _seed: &str) -> SlowSession {
            SlowSession {
                completed: self.completed.clone(),
            }
        }
    }

    #[tokio::test]
    async fn test_dropped_reader_lets_in_flight_call_finish() {
        let factory = SlowFactory::default();
        let transcript = vec![Turn::user("a"), Turn::user("b"), Turn::user("c")];
        let mut stream = relay(&factory, &transcript, "PROMPT").await.unwrap();

        let early = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
        assert!(early.is_err());
        drop(stream);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*factory.completed.lock().unwrap(), vec!["PROMPT", "b"]);
    }
}
