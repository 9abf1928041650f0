//! Main chat loop orchestration.
//!
//! Prints the banner and greeting, then reads lines and submits each one
//! through a [`ChatClient`], rendering the transcript as it streams in.

use std::io::Write;

use console::style;
use tracing::{debug, info};

use supportline_core::client::{ChatClient, SubmitOutcome};
use supportline_infra::transport::HttpTransport;

use super::banner::print_welcome_banner;
use super::input::{ChatInput, InputEvent};
use super::renderer::{BubbleRenderer, TranscriptView};

/// Run the interactive chat loop against the relay at `endpoint`.
pub async fn run_chat_loop(endpoint: &str) -> anyhow::Result<()> {
    print_welcome_banner(endpoint);

    let transport = HttpTransport::new(endpoint);
    info!(url = transport.url(), "starting terminal chat");
    let mut client = ChatClient::new(transport);

    let prompt = format!("{} ", style("you ›").magenta().bold());
    let (mut input, mut stdout) = ChatInput::new(prompt)?;
    let mut view = TranscriptView::new(BubbleRenderer::for_terminal());

    write!(stdout, "{}", view.update(client.transcript()))?;
    write!(stdout, "{}", view.finish_turn())?;
    stdout.flush()?;

    loop {
        let text = match input.read_line().await {
            InputEvent::Message(text) => text,
            InputEvent::Eof | InputEvent::Interrupted => break,
        };

        let outcome = client
            .submit(&text, |transcript| {
                let _ = write!(stdout, "{}", view.update(transcript));
                let _ = stdout.flush();
            })
            .await;

        match outcome {
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Completed => debug!("reply complete"),
            SubmitOutcome::Failed(err) => debug!(error = %err, "reply failed"),
        }

        write!(stdout, "{}", view.finish_turn())?;
        stdout.flush()?;
    }

    println!();
    println!("  {}", style("Goodbye.").dim());
    Ok(())
}
