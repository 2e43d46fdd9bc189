//! Shared types for the looter workspace.
//!
//! Defines the platform and sentiment enumerations, the scrape result record,
//! dashboard stats, API key settings, and env-driven application config used
//! by the extractor, sentiment, server, and CLI crates.

pub mod app_config;
pub mod config;
pub mod keys;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use keys::{ApiKeyConfig, KeyCounts};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Supported scrape targets. Wire codes (`ig`, `tk`, `x`) are the short
/// identifiers the dashboard and key store use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "ig")]
    Instagram,
    #[serde(rename = "tk")]
    Tiktok,
    #[serde(rename = "x")]
    X,
}

impl Platform {
    /// Short wire code used in serialized records and status messages.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Platform::Instagram => "ig",
            Platform::Tiktok => "tk",
            Platform::X => "x",
        }
    }

    /// Human-readable platform name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Tiktok => "TikTok",
            Platform::X => "X (Twitter)",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ig" | "instagram" => Ok(Platform::Instagram),
            "tk" | "tiktok" => Ok(Platform::Tiktok),
            "x" | "twitter" => Ok(Platform::X),
            _ => Err(CoreError::UnknownPlatform(s.to_owned())),
        }
    }
}

/// Classification label for a record's description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Parse a raw classifier response into a label.
    ///
    /// The response is trimmed and lower-cased; anything that is not an exact
    /// match for one of the three labels yields `None` rather than an error,
    /// so a chatty classifier reply is discarded instead of stored.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthesized scrape result.
///
/// Immutable after creation except for `sentiment`, which the enrichment
/// success path may overwrite with one of the three labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Unique within the result store for its lifetime.
    pub id: Uuid,
    pub platform: Platform,
    pub username: String,
    pub followers: u64,
    /// Creation-date snapshot.
    pub captured_at: NaiveDate,
    pub likes: u64,
    pub comments: Option<u64>,
    /// Populated for TikTok records only.
    pub views: Option<u64>,
    /// Populated for X records only.
    pub retweets: Option<u64>,
    pub description: String,
    /// `None` means "not yet classified".
    pub sentiment: Option<Sentiment>,
}

/// Headline dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrapeStats {
    pub total_processed: u64,
    pub active_tasks: u32,
    pub success_rate: f32,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
