//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lifecycle states of a submitted quote
///
/// A quote is created `Pending` and leaves that state at most once, when the
/// rating pipeline reports a result. It never returns to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Pending,
    Rated,
    Error,
    Deleted,
}

impl QuoteStatus {
    /// Stored/wire representation (matches the serde rename)
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "PENDING",
            QuoteStatus::Rated => "RATED",
            QuoteStatus::Error => "ERROR",
            QuoteStatus::Deleted => "DELETED",
        }
    }

    /// Parse the stored representation back into the enum
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(QuoteStatus::Pending),
            "RATED" => Ok(QuoteStatus::Rated),
            "ERROR" => Ok(QuoteStatus::Error),
            "DELETED" => Ok(QuoteStatus::Deleted),
            other => Err(Error::Internal(format!("unknown quote status: {other}"))),
        }
    }
}

/// A submitted quote and its rating lifecycle
///
/// `rating` is only meaningful once `status` is `Rated`; handlers in
/// quotd-web never write it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub status: QuoteStatus,
    pub rating: i64,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_inverts_as_str() {
        for status in [
            QuoteStatus::Pending,
            QuoteStatus::Rated,
            QuoteStatus::Error,
            QuoteStatus::Deleted,
        ] {
            assert_eq!(QuoteStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_parse_rejects_unknown() {
        assert!(QuoteStatus::parse("SCORED").is_err());
    }

    #[test]
    fn quote_serializes_with_wire_names() {
        let quote = Quote {
            id: 1,
            text: "A".to_string(),
            author: "B".to_string(),
            status: QuoteStatus::Pending,
            rating: 0,
            submitted_at: Utc::now(),
        };

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["status"], "PENDING");
        assert!(value.get("submittedAt").is_some());
        assert!(value.get("submitted_at").is_none());
    }
}
