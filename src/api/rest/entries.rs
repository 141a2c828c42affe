//! Entry endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{with_kb, ApiError, ApiResponse, ApiResult};
use crate::api::state::AppState;
use crate::types::{Entry, EntryBrief, Feedback};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// GET /api/entries - List entries, optionally for one category
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<EntryBrief>> {
    let entries = state.kb.list_brief(params.category.as_deref());
    let total = entries.len();
    Ok(Json(ApiResponse::with_total(entries, total)))
}

#[derive(Debug, Deserialize)]
pub struct CreateEntry {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: u64,
}

/// POST /api/entries - Create an entry
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateEntry>,
) -> Result<(StatusCode, Json<ApiResponse<Created>>), ApiError> {
    let id = with_kb(&state, move |kb| {
        kb.create(&body.question, &body.answer, body.category.as_deref())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(Created { id }))))
}

/// Single entry with its feedback counters
#[derive(Debug, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub feedback: Feedback,
}

/// GET /api/entries/:id
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<EntryDetail> {
    let entry = state.kb.get(id).ok_or_else(|| ApiError::entry_not_found(id))?;
    let feedback = state.kb.feedback(id).unwrap_or_default();
    Ok(Json(ApiResponse::new(EntryDetail { entry, feedback })))
}

/// Fields to change. An empty `category` removes the entry from its category.
#[derive(Debug, Deserialize)]
pub struct PatchEntry {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
}

/// PATCH /api/entries/:id
pub async fn patch_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<PatchEntry>,
) -> ApiResult<Entry> {
    if body.question.is_none() && body.answer.is_none() && body.category.is_none() {
        return Err(ApiError::bad_request("nothing to update"));
    }

    let entry = with_kb(&state, move |kb| {
        if kb.get(id).is_none() {
            return Ok(None);
        }
        if body.question.is_some() || body.answer.is_some() {
            kb.update(id, body.question.as_deref(), body.answer.as_deref())?;
        }
        if let Some(category) = body.category.as_deref() {
            kb.set_category(id, Some(category))?;
        }
        Ok(kb.get(id))
    })
    .await?
    .ok_or_else(|| ApiError::entry_not_found(id))?;

    Ok(Json(ApiResponse::new(entry)))
}

/// DELETE /api/entries/:id
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if with_kb(&state, move |kb| kb.delete(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::entry_not_found(id))
    }
}

#[derive(Debug, Deserialize)]
pub struct AddAlias {
    pub question: String,
}

/// POST /api/entries/:id/aliases - Add a similar question
pub async fn add_alias(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<AddAlias>,
) -> ApiResult<Entry> {
    let entry = with_kb(&state, move |kb| {
        Ok(if kb.add_alias(id, &body.question)? {
            kb.get(id)
        } else {
            None
        })
    })
    .await?
    .ok_or_else(|| ApiError::entry_not_found(id))?;

    Ok(Json(ApiResponse::new(entry)))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackBody {
    pub helpful: bool,
}

/// POST /api/entries/:id/feedback
pub async fn record_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<FeedbackBody>,
) -> ApiResult<Feedback> {
    let feedback = with_kb(&state, move |kb| {
        Ok(if kb.record_feedback(id, body.helpful)? {
            kb.feedback(id)
        } else {
            None
        })
    })
    .await?
    .ok_or_else(|| ApiError::entry_not_found(id))?;

    Ok(Json(ApiResponse::new(feedback)))
}
