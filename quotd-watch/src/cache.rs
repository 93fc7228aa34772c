//! View-layer quote cache
//!
//! Fetched quotes are cached under their request key. The score bridge
//! patches an entry in place when an update is pushed; nothing here ever
//! refetches.

use std::collections::HashMap;

use quotd_common::{Quote, QuoteUpdate};

/// Request key for one quote's detail fetch
pub fn quote_key(id: i64) -> String {
    format!("/api/quotes/{id}")
}

/// Key-value cache of fetched quotes, addressed by request key
#[derive(Debug, Default)]
pub struct QuoteCache {
    entries: HashMap<String, Quote>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, quote: Quote) {
        self.entries.insert(key, quote);
    }

    pub fn get(&self, key: &str) -> Option<&Quote> {
        self.entries.get(key)
    }

    /// Patch a cached entry with a pushed update, without refetching
    ///
    /// The update is authoritative for the fields it carries; everything
    /// else keeps its cached value. Returns false when nothing is cached
    /// under the key.
    pub fn patch(&mut self, key: &str, update: &QuoteUpdate) -> bool {
        match self.entries.get_mut(key) {
            Some(quote) => {
                quote.apply_update(update);
                true
            }
            None => false,
        }
    }
}
