//! catalog-intake binary entry point.
//!
//! Loads configuration once, builds the submission handler over the GitHub
//! forge, and serves the HTTP API until shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_intake::config::ServiceConfig;
use catalog_intake::server::{router, AppState};

/// Catalog submission service.
#[derive(Parser)]
#[command(name = "catalog-intake", about = "HTTP submission service for the customizations catalog")]
struct Cli {
    /// Path to a TOML config file (optional; env vars still apply).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address override, e.g. 0.0.0.0:8080.
    #[arg(long)]
    listen: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_intake=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config =
        ServiceConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set; submissions will be rejected until it is");
    }
    tracing::info!(
        owner = %config.repo_owner,
        repo = %config.repo_name,
        branch = %config.branch,
        "starting catalog-intake"
    );

    let listen = config.listen;
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {}", listen))?;
    tracing::info!(%listen, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .context("server error")?;

    Ok(())
}
