//! quotd-rt library - real-time rating gateway
//!
//! Fans rating updates out to browser SSE subscribers, one channel per
//! quote id, with a short replay window for subscribers that attach late.

use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod replay;

use replay::{ReplayRegistry, REPLAY_TTL};

/// Application state shared across HTTP handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: ReplayRegistry,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            registry: ReplayRegistry::new(REPLAY_TTL),
        }
    }
}

/// Build application router
///
/// Browsers connect cross-origin from quotd-web pages, so CORS is wide open.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::ok))
        .route("/health", get(api::health_check))
        .route("/update", post(api::ingest))
        .route("/:id", get(api::subscribe))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
