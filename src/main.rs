use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maintenance_preview::cli::{run_command, Cli};
use maintenance_preview::config::Config;
use maintenance_preview::startup::run_startup_checks;
use maintenance_preview::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; `config check` reports a broken file itself
    let loaded = Config::load(&cli.config);

    // Initialize logging
    let log_level = match (&cli.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.clone(),
        (None, Err(_)) => "info".to_string(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.command.is_some() {
        return run_command(&cli, loaded);
    }

    let config = loaded?;

    tracing::info!("Starting maintenance-preview v{}", env!("CARGO_PKG_VERSION"));

    if cli.skip_checks {
        tracing::warn!("Startup self-checks skipped");
    } else {
        let report = run_startup_checks(&config);
        if !report.all_critical_passed {
            anyhow::bail!("Startup checks failed: {}", report.summary);
        }
    }

    let state = Arc::new(AppState::new(config.clone()).context("Failed to load notice template")?);
    let app = maintenance_preview::api::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Preview server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

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
                tracing::error!(error = %e, "Failed to install signal handler");
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

    tracing::info!("Shutdown signal received");
}
