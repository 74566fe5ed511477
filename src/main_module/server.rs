//! HTTP server initialization and routing

use axum::{routing::get, Router};
use log::{error, info};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::board::{canvas_routes, card_routes};
use crate::config::AppConfig;
use crate::shared::state::AppState;

use super::{create_cors_layer, health_check, shutdown_signal};

pub fn build_router(app_state: Arc<AppState>, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(canvas_routes())
        .merge(card_routes())
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run_axum_server(app_state: Arc<AppState>, config: &AppConfig) -> std::io::Result<()> {
    let app = build_router(app_state, config);
    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(
                "Failed to bind to {}: {} - is another instance running?",
                addr, e
            );
            return Err(e);
        }
    };
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)?;
    info!("HTTP server stopped");
    Ok(())
}
