//! HTTP client for the quotd-web API

use serde::Deserialize;
use thiserror::Error;

use quotd_common::Quote;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Quote not found: {0}")]
    NotFound(i64),

    #[error("API error {0}: {1}")]
    Api(u16, String),
}

/// One page of quotes from the list endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePage {
    pub data: Vec<Quote>,
    #[serde(default)]
    pub next_cursor: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Submitted {
    id: i64,
}

/// Typed client for the quotd-web JSON API
pub struct QuoteApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuoteApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one quote by id
    pub async fn get_quote(&self, id: i64) -> Result<Quote, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/quotes/{}", self.base_url, id))
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => Err(ClientError::NotFound(id)),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(api_error(status, response).await),
        }
    }

    /// Fetch one page of quotes, newest first
    pub async fn list_quotes(
        &self,
        limit: i64,
        cursor: Option<i64>,
    ) -> Result<QuotePage, ClientError> {
        let mut url = format!("{}/api/quotes?limit={}", self.base_url, limit);
        if let Some(cursor) = cursor {
            url.push_str(&format!("&cursor={cursor}"));
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(response.json().await?)
    }

    /// Submit a new quote, returning its assigned id
    pub async fn submit_quote(&self, quote: &str, author: &str) -> Result<i64, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/quotes", self.base_url))
            .json(&serde_json::json!({ "quote": quote, "author": author }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(response.json::<Submitted>().await?.id)
    }
}

async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    ClientError::Api(status.as_u16(), body)
}
