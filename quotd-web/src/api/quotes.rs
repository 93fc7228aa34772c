//! Quote API: submission, cursor-paginated listing, detail lookup
//!
//! Each handler validates its own input before any store access. The list
//! endpoint is cursor-paginated on the quote id, so pages already issued
//! stay stable while new quotes arrive at the head of the ordering.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use quotd_common::db::quotes as store;
use quotd_common::Quote;

use crate::AppState;

/// Raw query parameters for the list endpoint
///
/// Kept as strings so validation is explicit and failures map to the API's
/// own error body instead of the extractor's.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

/// Validated list query
#[derive(Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: i64,
    pub cursor: Option<i64>,
}

impl ListQuery {
    /// Validate raw query parameters
    ///
    /// `limit` is required; both values must be positive integers.
    pub fn parse(params: &ListParams) -> Result<Self, ApiError> {
        let limit = match params.limit.as_deref() {
            Some(raw) => parse_positive(raw, "limit")?,
            None => return Err(ApiError::BadRequest("limit is required".to_string())),
        };

        let cursor = match params.cursor.as_deref() {
            Some(raw) => Some(parse_positive(raw, "cursor")?),
            None => None,
        };

        Ok(ListQuery { limit, cursor })
    }
}

fn parse_positive(raw: &str, field: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ApiError::BadRequest(format!(
            "{field} must be a positive integer"
        ))),
    }
}

/// Validated submission body
#[derive(Debug, PartialEq, Eq)]
pub struct Submission {
    pub quote: String,
    pub author: String,
}

impl Submission {
    /// Both fields must be present, strings, and non-empty
    pub fn parse(body: &serde_json::Value) -> Result<Self, ApiError> {
        Ok(Submission {
            quote: string_field(body, "quote")?,
            author: string_field(body, "author")?,
        })
    }
}

fn string_field(body: &serde_json::Value, field: &str) -> Result<String, ApiError> {
    match body.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ApiError::BadRequest(format!(
            "{field} must be a non-empty string"
        ))),
    }
}

/// One page of quotes, newest first
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub data: Vec<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
}

/// Id of a freshly created quote
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub id: i64,
}

/// GET /api/quotes?limit=N&cursor=M
///
/// Returns up to `limit` quotes ordered by id descending, starting strictly
/// after `cursor` when given. `nextCursor` is the id of the last item of the
/// page; a page shorter than `limit` signals end-of-list.
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let query = ListQuery::parse(&params)?;

    let data = store::list_page(&state.db, query.limit, query.cursor).await?;
    let next_cursor = data.last().map(|q| q.id);

    Ok(Json(ListResponse { data, next_cursor }))
}

/// POST /api/quotes
///
/// Creates a quote in `Pending` status and returns its id. Validation
/// failures write nothing.
pub async fn submit_quote(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let submission = Submission::parse(&body)?;

    let id = store::insert_quote(&state.db, &submission.quote, &submission.author).await?;

    Ok(Json(SubmitResponse { id }))
}

/// GET /api/quotes/:id
///
/// Returns the full row, or a bare 404 for an unknown id.
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Quote>, ApiError> {
    match store::find_quote(&state.db, id).await? {
        Some(quote) => Ok(Json(quote)),
        None => Err(ApiError::NotFound),
    }
}

/// Quote API errors
#[derive(Debug)]
pub enum ApiError {
    /// Validation failure: 400 with an error body
    BadRequest(String),
    /// Unknown id: bare 404, no body
    NotFound,
    /// Store failure
    Internal(quotd_common::Error),
}

impl From<quotd_common::Error> for ApiError {
    fn from(err: quotd_common::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                error!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(err) => {
                error!("Store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}
