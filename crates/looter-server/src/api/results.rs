use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use looter_core::PostRecord;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ResultsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ClearedData {
    pub cleared: usize,
}

pub(super) async fn list_results(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ResultsQuery>,
) -> Json<ApiResponse<Vec<PostRecord>>> {
    #[allow(clippy::cast_sign_loss)]
    let limit = normalize_limit(query.limit) as usize;
    Json(ApiResponse {
        data: state.store.recent(limit),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn clear_results(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ClearedData>> {
    let cleared = state.store.clear();
    tracing::info!(cleared, "result store cleared");
    Json(ApiResponse {
        data: ClearedData { cleared },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Kick off sentiment analysis for one record.
///
/// The classification runs as an independent background task; the response is
/// 202 with the record as it currently stands. Clients observe the label by
/// re-fetching results.
pub(super) async fn analyze_result(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<PostRecord>>), ApiError> {
    let Some(record) = state.store.get(id) else {
        return Err(ApiError::new(req_id.0, "not_found", "no such result"));
    };

    let Some(classifier) = state.classifier.clone() else {
        return Err(ApiError::new(
            req_id.0,
            "unavailable",
            "sentiment analysis is not configured",
        ));
    };

    looter_sentiment::spawn_enrichment(classifier, state.store.clone(), id);

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse {
            data: record,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
