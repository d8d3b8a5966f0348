pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::registry::SessionRegistry;
use crate::services::results::ResultStore;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub results: Arc<ResultStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the router with all practice routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Session routes
        .route("/api/sessions", post(routes::sessions::create))
        .route("/api/sessions/:id", delete(routes::sessions::abandon))
        .route("/api/sessions/:id/prompt", get(routes::sessions::prompt))
        .route("/api/sessions/:id/progress", get(routes::sessions::progress))
        .route("/api/sessions/:id/answers", post(routes::sessions::answer))
        // Result routes
        .route("/api/results", get(routes::results::recent))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = router(AppState::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
