//! Terminal rendering of the transcript as chat bubbles.
//!
//! Assistant turns are left-aligned, user turns right-aligned, each wrapped
//! to three quarters of the terminal width. `TranscriptView` turns successive
//! transcript snapshots into the text to print, so a streaming reply appears
//! chunk by chunk on one growing line.

use console::{StyledObject, measure_text_width, style};

use supportline_core::transcript::Transcript;
use supportline_types::chat::{Role, Turn};

/// Greedy word wrap; words wider than `max_width` get a line of their own.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                measure_text_width(word)
            } else {
                measure_text_width(&line) + 1 + measure_text_width(word)
            };
            if !line.is_empty() && needed > max_width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}

pub struct BubbleRenderer {
    width: usize,
}

impl BubbleRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(20),
        }
    }

    pub fn for_terminal() -> Self {
        let (_, columns) = console::Term::stdout().size();
        Self::new(columns as usize)
    }

    pub fn label(role: Role) -> StyledObject<&'static str> {
        match role {
            Role::Assistant => style("StudyMaster ›").cyan().bold(),
            Role::User => style("you ›").magenta().bold(),
        }
    }

    /// A complete turn as one or more aligned lines (no trailing newline).
    pub fn bubble(&self, turn: &Turn) -> String {
        let lines = wrap(&turn.content, self.width * 3 / 4);
        let rendered: Vec<String> = match turn.role {
            Role::Assistant => lines
                .iter()
                .map(|line| style(line).cyan().to_string())
                .collect(),
            Role::User => lines
                .iter()
                .map(|line| {
                    let pad = self.width.saturating_sub(measure_text_width(line));
                    format!("{}{}", " ".repeat(pad), style(line).magenta())
                })
                .collect(),
        };
        rendered.join("\n")
    }
}

/// Incremental printer for transcript snapshots.
pub struct TranscriptView {
    renderer: BubbleRenderer,
    printed: usize,
    /// Content already shown for the assistant turn still on screen.
    streaming: Option<String>,
}

impl TranscriptView {
    pub fn new(renderer: BubbleRenderer) -> Self {
        Self {
            renderer,
            printed: 0,
            streaming: None,
        }
    }

    /// Text to print so the screen reflects `transcript`.
    pub fn update(&mut self, transcript: &Transcript) -> String {
        let turns = transcript.turns();
        let mut out = String::new();

        if turns.len() <= self.printed {
            let Some(last) = turns.last() else {
                return out;
            };
            let shown_len = match &self.streaming {
                Some(shown) if last.content.starts_with(shown.as_str()) => Some(shown.len()),
                _ => None,
            };
            match shown_len {
                Some(len) => {
                    out.push_str(&style(&last.content[len..]).cyan().to_string());
                    self.streaming = Some(last.content.clone());
                }
                // The last turn was replaced (error apology): print it whole.
                None => {
                    if self.streaming.take().is_some() {
                        out.push('\n');
                    }
                    out.push_str(&self.renderer.bubble(last));
                    out.push('\n');
                }
            }
            self.printed = turns.len();
            return out;
        }

        let total = turns.len();
        for (index, turn) in turns.iter().enumerate().skip(self.printed) {
            if self.streaming.take().is_some() {
                out.push('\n');
            }
            if turn.role == Role::Assistant && index + 1 == total {
                out.push_str(&format!("{} ", BubbleRenderer::label(turn.role)));
                out.push_str(&style(&turn.content).cyan().to_string());
                self.streaming = Some(turn.content.clone());
            } else {
                out.push_str(&self.renderer.bubble(turn));
                out.push('\n');
            }
        }
        self.printed = total;
        out
    }

    /// Close the line of a finished streaming reply.
    pub fn finish_turn(&mut self) -> String {
        match self.streaming.take() {
            Some(_) => "\n".to_string(),
            None => String::new(),
        }
    }
}
