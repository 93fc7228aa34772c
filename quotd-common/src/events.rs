//! Cross-service event payloads
//!
//! The rating pipeline reports results as partial quote updates pushed over
//! the real-time channel. A payload carries only the fields that changed;
//! merging one over a quote preserves everything it omits.

use serde::{Deserialize, Serialize};

use crate::db::models::{Quote, QuoteStatus};

/// Partial update for one quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

impl Quote {
    /// Merge a pushed update over this quote, field by field
    ///
    /// Fields absent from the payload keep their current value. The pushed
    /// data is authoritative for the fields it does carry; no refetch.
    pub fn apply_update(&mut self, update: &QuoteUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending_quote() -> Quote {
        Quote {
            id: 3,
            text: "To be".to_string(),
            author: "W.S.".to_string(),
            status: QuoteStatus::Pending,
            rating: 0,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn gateway_payload_deserializes() {
        let update: QuoteUpdate =
            serde_json::from_str(r#"{"id":3,"status":"RATED","rating":4}"#).unwrap();
        assert_eq!(update.id, 3);
        assert_eq!(update.status, Some(QuoteStatus::Rated));
        assert_eq!(update.rating, Some(4));
    }

    #[test]
    fn apply_update_merges_only_present_fields() {
        let mut quote = pending_quote();
        quote.apply_update(&QuoteUpdate {
            id: 3,
            status: Some(QuoteStatus::Rated),
            rating: None,
        });

        assert_eq!(quote.status, QuoteStatus::Rated);
        assert_eq!(quote.rating, 0);
        assert_eq!(quote.text, "To be");
        assert_eq!(quote.author, "W.S.");
    }

    #[test]
    fn apply_update_sets_status_and_rating() {
        let mut quote = pending_quote();
        quote.apply_update(&QuoteUpdate {
            id: 3,
            status: Some(QuoteStatus::Rated),
            rating: Some(4),
        });

        assert_eq!(quote.status, QuoteStatus::Rated);
        assert_eq!(quote.rating, 4);
    }
}
