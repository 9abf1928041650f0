//! Client-owned transcript state.
//!
//! The transcript lives for as long as the chat view does and is never
//! persisted. It is mutated only through the three reducer-style operations
//! below; renderers read it through [`Transcript::turns`].

use supportline_types::chat::Turn;

/// First assistant turn shown before the user says anything.
pub const GREETING: &str = "Hi, I'm the StudyMaster! How can I help you?";

/// Content of the assistant turn appended while a reply is pending.
pub const PLACEHOLDER: &str = "...";

/// Replaces the pending assistant turn when a request fails.
pub const ERROR_MESSAGE: &str = "Sorry, there was an error processing your message.";

/// Ordered, append-only conversation as seen by one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript holding only the greeting.
    pub fn new() -> Self {
        Self::from_turns(vec![Turn::assistant(GREETING)])
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Start a new exchange.
    ///
    /// Returns `None` (and changes nothing) for blank input. Otherwise
    /// returns the payload to post -- the previous turns plus the trimmed
    /// user turn -- and appends that user turn followed by the placeholder,
    /// which is never part of the payload.
    pub fn append_user_turn(&mut self, text: &str) -> Option<Vec<Turn>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let user_turn = Turn::user(text);
        let mut payload = self.turns.clone();
        payload.push(user_turn.clone());

        self.turns.push(user_turn);
        self.turns.push(Turn::assistant(PLACEHOLDER));
        Some(payload)
    }

    /// Append streamed reply text to the last entry.
    ///
    /// The chunk is concatenated after whatever is there, placeholder
    /// included.
    pub fn append_assistant_chunk(&mut self, chunk: &str) {
        match self.turns.last_mut() {
            Some(last) => last.content.push_str(chunk),
            None => self.turns.push(Turn::assistant(chunk)),
        }
    }

    /// Drop the last entry and append the fixed apology in its place.
    pub fn replace_last_with_error(&mut self) {
        self.turns.pop();
        self.turns.push(Turn::assistant(ERROR_MESSAGE));
    }
}
