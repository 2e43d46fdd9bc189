use axum::{extract::State, Extension, Json};
use serde::Serialize;

use looter_core::{ApiKeyConfig, KeyCounts};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SaveAck {
    pub saved: bool,
    pub message: &'static str,
}

/// Redacted settings view: per-field key counts, never key material.
pub(super) async fn get_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<KeyCounts>> {
    let counts = state.keys.read().await.key_counts();
    Json(ApiResponse {
        data: counts,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Replace the in-memory key configuration.
///
/// The acknowledgment is the only observable effect; nothing persists across
/// a restart.
pub(super) async fn save_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(new_keys): Json<ApiKeyConfig>,
) -> Json<ApiResponse<SaveAck>> {
    let counts = new_keys.key_counts();
    *state.keys.write().await = new_keys;
    tracing::info!(
        ig_keys = counts.ig_keys,
        x_tk_busqueda = counts.x_tk_busqueda,
        x_tk_timeline = counts.x_tk_timeline,
        "api key configuration replaced"
    );

    Json(ApiResponse {
        data: SaveAck {
            saved: true,
            message: "configuration saved",
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
