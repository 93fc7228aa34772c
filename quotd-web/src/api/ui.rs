//! UI serving routes
//!
//! Serves the embedded HTML/JS UI: submission form, paginated list, and the
//! per-quote detail view with its live rating update.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use quotd_common::db::quotes as store;

use crate::api::quotes::ApiError;
use crate::AppState;

const INDEX_HTML: &str = include_str!("../ui/index.html");
const QUOTE_HTML: &str = include_str!("../ui/quote.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// GET /
///
/// Serves the main page: submission form plus the quote list.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /quote/:id
///
/// Existence is confirmed with an id-only lookup before serving. The page
/// itself fetches the full row and subscribes for the rating push against
/// the gateway URL embedded here.
pub async fn serve_quote_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    if !store::quote_exists(&state.db, id).await? {
        return Err(ApiError::NotFound);
    }

    let page = QUOTE_HTML
        .replace("{{QUOTE_ID}}", &id.to_string())
        .replace("{{RT_URL}}", &state.rt_url);

    Ok(Html(page).into_response())
}

/// GET /static/app.js
///
/// Serves the JavaScript application.
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}
