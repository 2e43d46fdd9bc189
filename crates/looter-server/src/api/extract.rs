use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use looter_core::Platform;
use looter_extract::{parse_csv_targets, parse_handles, ExtractError, JobReport, JobStatus};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum InputFormat {
    #[default]
    Manual,
    Csv,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExtractionRequest {
    pub platform: Platform,
    pub input: String,
    #[serde(default)]
    pub format: InputFormat,
}

/// Trigger one extraction job.
///
/// Blank input parses to zero targets and returns an empty report without
/// starting a job. A job already in flight answers 409; the trigger is
/// rejected, never queued.
pub(super) async fn trigger_extraction(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(req): Json<ExtractionRequest>,
) -> Result<Json<ApiResponse<JobReport>>, ApiError> {
    let targets = match req.format {
        InputFormat::Manual => parse_handles(&req.input),
        InputFormat::Csv => parse_csv_targets(&req.input)
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
    };

    match state.runner.run(req.platform, &targets).await {
        Ok(report) => Ok(Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(err @ ExtractError::Busy) => {
            Err(ApiError::new(req_id.0, "conflict", err.to_string()))
        }
        Err(err) => {
            tracing::error!(error = %err, "extraction job failed");
            Err(ApiError::new(req_id.0, "internal_error", err.to_string()))
        }
    }
}

pub(super) async fn extraction_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<JobStatus>> {
    Json(ApiResponse {
        data: state.runner.status(),
        meta: ResponseMeta::new(req_id.0),
    })
}
