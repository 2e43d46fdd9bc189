use axum::{extract::State, Extension, Json};
use serde::Serialize;

use looter_core::{Platform, ScrapeStats};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

// Fabricated dashboard series. The scraping backend is a mock; only
// `results_in_store` and `active_tasks` reflect live state.
const WEEKLY_VOLUME: &[(&str, u32)] = &[
    ("Mon", 400),
    ("Tue", 700),
    ("Wed", 600),
    ("Thu", 900),
    ("Fri", 500),
    ("Sat", 1_200),
    ("Sun", 800),
];

const PLATFORM_SPLIT: &[(Platform, u8)] = &[
    (Platform::Instagram, 65),
    (Platform::X, 25),
    (Platform::Tiktok, 10),
];

#[derive(Debug, Serialize)]
pub(super) struct StatsData {
    pub totals: ScrapeStats,
    /// Live count of records currently held by the result store.
    pub results_in_store: usize,
    pub posts_extracted: u64,
    pub avg_engagement_pct: f32,
    pub weekly_volume: Vec<VolumePoint>,
    pub platform_split: Vec<PlatformShare>,
}

#[derive(Debug, Serialize)]
pub(super) struct VolumePoint {
    pub day: &'static str,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct PlatformShare {
    pub platform: Platform,
    pub percent: u8,
}

pub(super) async fn get_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<StatsData>> {
    let data = StatsData {
        totals: ScrapeStats {
            total_processed: 1_284,
            active_tasks: u32::from(!state.runner.is_idle()),
            success_rate: 98.6,
        },
        results_in_store: state.store.len(),
        posts_extracted: 45_200,
        avg_engagement_pct: 4.8,
        weekly_volume: WEEKLY_VOLUME
            .iter()
            .map(|&(day, count)| VolumePoint { day, count })
            .collect(),
        platform_split: PLATFORM_SPLIT
            .iter()
            .map(|&(platform, percent)| PlatformShare { platform, percent })
            .collect(),
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
