//! Synthetic data provider.
//!
//! Stands in for real scrape output. The runner only sees the trait, so tests
//! inject deterministic fixtures in place of random values.

use chrono::Utc;
use looter_core::{Platform, PostRecord, Sentiment};
use rand::Rng;
use uuid::Uuid;

use crate::error::ExtractError;

/// Source of synthesized scrape records.
pub trait SampleProvider: Send + Sync {
    /// Produce one record for `username` on `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Synthesis`] when a record cannot be produced;
    /// the runner discards the whole batch and fails the job.
    fn synthesize(&self, platform: Platform, username: &str)
        -> Result<PostRecord, ExtractError>;
}

/// Default provider: bounded-random engagement numbers, a platform-templated
/// description, and a random positive/neutral sentiment seed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomProvider;

impl SampleProvider for RandomProvider {
    fn synthesize(
        &self,
        platform: Platform,
        username: &str,
    ) -> Result<PostRecord, ExtractError> {
        let mut rng = rand::rng();

        let (views, retweets) = match platform {
            Platform::Tiktok => (Some(rng.random_range(0..2_000_000)), None),
            Platform::X => (None, Some(rng.random_range(0..2_000))),
            Platform::Instagram => (None, None),
        };

        let seed = if rng.random_bool(0.5) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        };

        Ok(PostRecord {
            id: Uuid::new_v4(),
            platform,
            username: username.to_owned(),
            followers: rng.random_range(0..1_000_000),
            captured_at: Utc::now().date_naive(),
            likes: rng.random_range(0..5_000),
            comments: Some(rng.random_range(0..200)),
            views,
            retweets,
            description: format!("Exploring the latest trends on {platform}. #vibe #social"),
            sentiment: Some(seed),
        })
    }
}
