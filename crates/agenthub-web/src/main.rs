//! agenthub-web: Axum server for the agent marketplace.

mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;
use tracing::{info, warn};

use agenthub_core::config::Config;
use agenthub_core::marketplace::Marketplace;

use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load_from_dir(&project_root)?;

    let static_dir = config.static_dir.as_deref().map(|d| config.resolve_path(d));
    let port = config.port;

    let marketplace = Marketplace::from_config(config).await;
    if let Some(err) = &marketplace.last_error {
        warn!("Serving bundled catalog: {}", err);
    }
    eprintln!(
        "\n  Catalog: {} agents from {}",
        marketplace.catalog().len(),
        marketplace.source().describe()
    );

    let state = Arc::new(AppState {
        marketplace: RwLock::new(marketplace),
        static_dir,
    });
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", port);
    eprintln!("  Open http://localhost:{} to browse agents\n", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    // Graceful shutdown on Ctrl+C
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server stopped.");
    Ok(())
}
