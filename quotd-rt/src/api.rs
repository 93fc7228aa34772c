//! HTTP surface of the real-time gateway

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use quotd_common::QuoteUpdate;

use crate::AppState;

/// GET /:id
///
/// SSE stream of rating updates for one quote. Buffered updates are replayed
/// first, then live updates follow; the client decides when to disconnect.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client for quote {}", id);

    let stream = state
        .registry
        .subscribe(id)
        .await
        .filter_map(|update| async move { Event::default().json_data(&update).ok().map(Ok) });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}

/// POST /update
///
/// Ingestion point for the rating pipeline. The update is buffered for late
/// subscribers and fanned out to everyone currently connected.
pub async fn ingest(
    State(state): State<AppState>,
    Json(update): Json<QuoteUpdate>,
) -> Json<serde_json::Value> {
    let id = update.id;
    let subscribers = state.registry.publish(update).await;
    info!(
        "Update for quote {} delivered to {} subscribers",
        id, subscribers
    );

    Json(json!({ "subscribers": subscribers }))
}

/// GET / - plain liveness probe
pub async fn ok() -> &'static str {
    "OK"
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "quotd-rt".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
