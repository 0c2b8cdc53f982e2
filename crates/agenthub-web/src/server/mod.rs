//! Web server: Axum router + shared state.

pub mod api;
pub mod ws;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use agenthub_core::marketplace::Marketplace;

/// Shared application state.
pub struct AppState {
    pub marketplace: RwLock<Marketplace>,
    pub static_dir: Option<PathBuf>,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::very_permissive();

    let mut app = Router::new()
        .merge(api::routes())
        .merge(ws::routes())
        .layer(cors)
        .with_state(state.clone());

    // Serve a front-end bundle if one is configured and present
    if let Some(dist) = state.static_dir.as_ref().filter(|d| d.is_dir()) {
        let index_html = dist.join("index.html");
        app = app.fallback_service(ServeDir::new(dist).not_found_service(ServeFile::new(index_html)));
    }

    app
}
