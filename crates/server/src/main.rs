use std::time::Duration;

use anyhow::Result;
use tokio::sync::oneshot;
use trendscope_core::config::{AppConfig, LoadOptions};
use trendscope_server::{app, bootstrap, index, serve};

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use trendscope_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let application = bootstrap::bootstrap_with_config(config)?;
    let server_config = application.config.server.clone();

    let listener = tokio::net::TcpListener::bind(server_config.listen_address()).await?;
    let local_address = listener.local_addr()?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %local_address,
        cors_enabled = server_config.cors_enabled,
        "market analysis api listening"
    );
    for (method, path, summary) in index::ENDPOINTS {
        tracing::info!(
            event_name = "system.server.endpoint",
            correlation_id = "bootstrap",
            method,
            path,
            "{summary}"
        );
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(
        listener,
        app(application.state, server_config.cors_enabled),
        async move {
            let _ = shutdown_rx.await;
        },
    ));

    wait_for_shutdown().await?;
    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        grace_secs = server_config.graceful_shutdown_secs,
        "market analysis api stopping"
    );
    let _ = shutdown_tx.send(());

    let grace = Duration::from_secs(server_config.graceful_shutdown_secs);
    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(
            event_name = "system.server.shutdown_timeout",
            correlation_id = "shutdown",
            "in-flight requests did not drain before the grace period elapsed"
        ),
    }

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
