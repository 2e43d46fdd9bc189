//! Sentiment enrichment for scrape records.
//!
//! Wraps the generative-text classification API behind a small client, asks
//! it for exactly one of three labels per record description, and writes the
//! parsed label back into the result store. Calls are independent per record
//! and fire-and-forget: every failure path degrades to "no visible change"
//! with an operator-facing log line.

pub mod client;
pub mod enrich;
pub mod error;

pub use client::{SentimentClient, DEFAULT_MODEL};
pub use enrich::{enrich_record, spawn_enrichment};
pub use error::SentimentError;
