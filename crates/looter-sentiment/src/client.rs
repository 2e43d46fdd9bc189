//! HTTP client for the generative-text sentiment classifier.
//!
//! Wraps `reqwest` around the Gemini `generateContent` endpoint with a
//! one-word-label prompt. The response contract is deliberately loose: only
//! an exact `positive`/`negative`/`neutral` reply (after trim + lower-case)
//! counts as a classification; anything else is "no label", not an error.

use std::time::Duration;

use looter_core::Sentiment;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Model the classifier prompt is sent to unless configured otherwise.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Client for the text-classification capability.
///
/// Use [`SentimentClient::new`] for production or
/// [`SentimentClient::with_base_url`] to point at a mock server in tests.
pub struct SentimentClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl SentimentClient {
    /// Creates a client pointed at the production classifier endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SentimentError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("looter/0.1 (sentiment)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the model path instead of replacing a segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| SentimentError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
        })
    }

    /// Classify one record description.
    ///
    /// Sends the one-word-label prompt, extracts the first candidate text,
    /// and parses it with [`Sentiment::from_label`]. Returns `Ok(None)` when
    /// the classifier answers with anything other than one of the three
    /// labels, or with no candidates at all — the caller discards those.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SentimentError::Deserialize`] when the response body does not
    ///   match the expected envelope.
    pub async fn classify(&self, description: &str) -> Result<Option<Sentiment>, SentimentError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        let url = self
            .base_url
            .join(&path)
            .map_err(|e| SentimentError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let prompt = format!(
            "Analyze the sentiment of this social media post: \"{description}\". \
             Return ONLY one word: POSITIVE, NEGATIVE, or NEUTRAL."
        );
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let raw = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| SentimentError::Deserialize {
                context: format!("generateContent({})", self.model),
                source: e,
            })?;

        let label = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text);

        match label {
            Some(text) => Ok(Sentiment::from_label(&text)),
            None => {
                tracing::debug!("classifier returned no candidates");
                Ok(None)
            }
        }
    }
}
