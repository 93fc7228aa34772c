//! quotd-watch library - terminal client for the quote system
//!
//! Realizes the score-update path as an explicit state machine: fetch and
//! cache a quote, subscribe for exactly one pushed update, merge it into the
//! cached copy without refetching, disconnect.

pub mod bridge;
pub mod cache;
pub mod client;
pub mod render;
pub mod sse;
