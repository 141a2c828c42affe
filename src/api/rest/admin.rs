//! Import, category and statistics endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{with_kb, ApiResponse, ApiResult};
use crate::api::state::AppState;
use crate::search::IndexStats;
use crate::types::{BatchRecord, BatchReport, StatsReport};

#[derive(Debug, Deserialize)]
pub struct ImportBody {
    pub items: Vec<BatchRecord>,
}

/// POST /api/import - Add many entries; incomplete records are skipped
pub async fn import_entries(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ImportBody>,
) -> ApiResult<BatchReport> {
    let report = with_kb(&state, move |kb| kb.batch_add(body.items)).await?;
    Ok(Json(ApiResponse::new(report)))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    let categories = state.kb.list_categories();
    let total = categories.len();
    Ok(Json(ApiResponse::with_total(categories, total)))
}

#[derive(Debug, Serialize)]
pub struct StatsBody {
    pub stats: StatsReport,
    pub index: IndexStats,
}

/// GET /api/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<StatsBody> {
    Ok(Json(ApiResponse::new(StatsBody {
        stats: state.kb.stats(),
        index: state.kb.snapshot().stats(),
    })))
}
