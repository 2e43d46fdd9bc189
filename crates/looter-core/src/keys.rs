//! In-memory API key settings.
//!
//! The settings surface edits three comma-separated credential lists and
//! acknowledges saves without persisting anything. Key material never leaves
//! the process: reads expose per-field counts only, and `Debug` output is
//! redacted.

use serde::{Deserialize, Serialize};

/// Credential configuration for the three scraper surfaces.
///
/// Each field is a free-text, comma-separated list of opaque keys; multiple
/// keys per field are intended for rotation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyConfig {
    /// Instagram API keys.
    pub ig_keys: String,
    /// X & TikTok search credentials.
    pub x_tk_busqueda: String,
    /// X & TikTok timeline credentials.
    pub x_tk_timeline: String,
}

/// Redacted read view: how many keys each field holds, never the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCounts {
    pub ig_keys: usize,
    pub x_tk_busqueda: usize,
    pub x_tk_timeline: usize,
}

impl ApiKeyConfig {
    /// Split a comma-separated key list, trimming entries and dropping empties.
    #[must_use]
    pub fn split_keys(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Per-field key counts for the redacted read surface.
    #[must_use]
    pub fn key_counts(&self) -> KeyCounts {
        KeyCounts {
            ig_keys: Self::split_keys(&self.ig_keys).len(),
            x_tk_busqueda: Self::split_keys(&self.x_tk_busqueda).len(),
            x_tk_timeline: Self::split_keys(&self.x_tk_timeline).len(),
        }
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts = self.key_counts();
        f.debug_struct("ApiKeyConfig")
            .field("ig_keys", &format_args!("[{} redacted]", counts.ig_keys))
            .field(
                "x_tk_busqueda",
                &format_args!("[{} redacted]", counts.x_tk_busqueda),
            )
            .field(
                "x_tk_timeline",
                &format_args!("[{} redacted]", counts.x_tk_timeline),
            )
            .finish()
    }
}
