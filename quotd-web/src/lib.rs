//! quotd-web library - quote submission and browsing service
//!
//! JSON API (submit, cursor-paginated list, detail) plus the embedded web UI
//! over a SQLite quote store.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Base URL of the real-time gateway, embedded into served pages
    pub rt_url: String,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, rt_url: String) -> Self {
        Self { db, rt_url }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // JSON API
        .route(
            "/api/quotes",
            get(api::quotes::list_quotes).post(api::quotes::submit_quote),
        )
        .route("/api/quotes/:id", get(api::quotes::get_quote))
        // Embedded UI
        .route("/", get(api::ui::serve_index))
        .route("/quote/:id", get(api::ui::serve_quote_page))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .merge(api::health::health_routes())
        .with_state(state)
}
