//! SafeRoute server - safety-weighted pedestrian routing over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use saferoute_core::create_routing_model;
use saferoute_server::{AppState, ServerConfig, build_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SafeRoute server - routes that prefer lit, patrolled, busy streets
#[derive(Parser, Debug)]
#[command(name = "saferoute-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "saferoute.toml", env = "SAFEROUTE_CONFIG")]
    config: PathBuf,

    /// Host address to bind to, overrides the config file
    #[arg(long, env = "SAFEROUTE_HOST")]
    host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(short, long, env = "SAFEROUTE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing::info!("Starting SafeRoute server...");
    tracing::info!("Feature table: {}", config.features_path.display());

    // Blocking construction phase, done before the listener is bound
    let model_config = config.model_config();
    let model = tokio::task::spawn_blocking(move || create_routing_model(&model_config))
        .await
        .context("Model construction task failed")?
        .context("Failed to build routing model")?;

    let state = Arc::new(AppState::from_model(
        model,
        config.routing,
        config.request_timeout(),
    ));
    let app = build_router(state, config.max_concurrent_requests);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;

    tracing::info!("SafeRoute server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
