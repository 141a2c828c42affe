//! Query endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::{with_kb, ApiError, ApiResponse, ApiResult};
use crate::api::state::AppState;
use crate::types::QueryResult;

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The question to answer
    #[serde(default)]
    pub q: String,
    pub threshold: Option<f64>,
    pub category: Option<String>,
}

/// GET /api/query - Best answer for `q`
pub async fn query_answer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> ApiResult<QueryResult> {
    if params.q.trim().is_empty() {
        return Err(ApiError::bad_request("Query parameter 'q' is required"));
    }

    let result = with_kb(&state, move |kb| {
        kb.query(&params.q, params.threshold, params.category.as_deref())
    })
    .await?;
    Ok(Json(ApiResponse::new(result)))
}
