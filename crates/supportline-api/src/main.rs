//! Supportline entry point.
//!
//! Binary name: `supportline`
//!
//! Parses CLI arguments, initializes tracing and configuration, then either
//! starts the relay server or runs the terminal chat client.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use supportline_infra::config::load_config;
use supportline_observe::tracing_setup::{init_tracing, shutdown_tracing};
use supportline_types::config::AppConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "supportline", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config = load_config(cli.config.as_deref()).await;

    let result = match cli.command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::Chat { endpoint } => {
            let endpoint = endpoint.unwrap_or(config.client.endpoint);
            cli::chat::loop_runner::run_chat_loop(&endpoint).await
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}

/// Bind the listener and serve the relay until Ctrl+C / SIGTERM.
async fn serve(config: AppConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let state = AppState::init(&config.relay)?;

    let addr = format!(
        "{}:{}",
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port)
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} StudyMaster support chat on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// If a handler cannot be installed, that signal is simply never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
