//! finchat CLI and REST API entry point.
//!
//! Binary name: `finchat`
//!
//! Parses CLI arguments, initializes tracing, config and services, then
//! dispatches to the terminal chat, a one-shot command, or the REST API
//! server.

mod cli;
mod http;
mod info;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    finchat_observe::tracing_setup::init_tracing(cli.log_directives(), cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    finchat_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "finchat", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.catalog.clone()).await?;

    match cli.command {
        Commands::Chat => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::Match { query, top_k } => {
            cli::services::match_query(&state, &query.join(" "), top_k, cli.json).await?;
        }

        Commands::Services => {
            cli::services::list_services(&state, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} finchat API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            if !state.chat_service.client().is_configured() {
                println!(
                    "  {} {}",
                    console::style("!").yellow().bold(),
                    console::style("No API key configured; replies will be the offline notice.").yellow()
                );
            }
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let sweeper = state.spawn_session_sweeper();
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if let Some(sweeper) = sweeper {
                sweeper.abort();
            }

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
