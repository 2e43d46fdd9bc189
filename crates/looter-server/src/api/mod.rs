mod extract;
mod results;
mod settings;
mod stats;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use looter_core::{ApiKeyConfig, AppConfig};
use looter_extract::{JobRunner, JobTiming, RandomProvider, ResultStore};
use looter_sentiment::SentimentClient;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub store: ResultStore,
    pub runner: Arc<JobRunner>,
    pub keys: Arc<RwLock<ApiKeyConfig>>,
    /// `None` when no classifier key is configured; the analyze endpoint
    /// answers 503 in that case.
    pub classifier: Option<Arc<SentimentClient>>,
}

impl AppState {
    /// Wire up the store, runner, and optional classifier from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store = ResultStore::new();
        let runner = Arc::new(JobRunner::new(
            Arc::new(RandomProvider),
            store.clone(),
            JobTiming::from_millis(
                config.connect_delay_ms,
                config.extract_delay_ms,
                config.status_linger_ms,
            ),
        ));

        let classifier = match &config.gemini_api_key {
            Some(key) => Some(Arc::new(SentimentClient::new(
                key,
                &config.gemini_model,
                config.sentiment_timeout_secs,
            )?)),
            None => {
                tracing::warn!("GEMINI_API_KEY not set; sentiment analysis disabled");
                None
            }
        };

        Ok(Self {
            store,
            runner,
            keys: Arc::new(RwLock::new(ApiKeyConfig::default())),
            classifier,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    results: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(50).clamp(1, 200)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/stats", get(stats::get_stats))
        .route("/api/v1/extractions", post(extract::trigger_extraction))
        .route(
            "/api/v1/extractions/status",
            get(extract::extraction_status),
        )
        .route(
            "/api/v1/results",
            get(results::list_results).delete(results::clear_results),
        )
        .route(
            "/api/v1/results/{id}/analyze",
            post(results::analyze_result),
        )
        .route(
            "/api/v1/settings",
            get(settings::get_settings).put(settings::save_settings),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            results: state.store.len(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
