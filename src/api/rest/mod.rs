//! REST endpoints:
//! - `GET /api/query` - Answer a question
//! - `GET|POST /api/entries` - List or create entries
//! - `GET|PATCH|DELETE /api/entries/:id` - Single entry
//! - `POST /api/entries/:id/aliases` - Add a similar question
//! - `POST /api/entries/:id/feedback` - Record feedback
//! - `POST /api/import` - Batch add
//! - `GET /api/categories` - Category names
//! - `GET /api/stats` - Counters and index size

pub mod admin;
pub mod entries;
pub mod query;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use super::state::AppState;
use crate::error::{QaError, QaResult};
use crate::knowledge_base::KnowledgeBase;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    /// Total count for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, total: None }
    }

    pub fn with_total(data: T, total: usize) -> Self {
        Self {
            data,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn entry_not_found(id: u64) -> Self {
        Self::not_found(format!("entry {} not found", id))
    }
}

impl From<QaError> for ApiError {
    fn from(err: QaError) -> Self {
        match err {
            QaError::InvalidInput(message) => Self::bad_request(message),
            other => {
                error!(error = %other, "request failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Run a store operation on the blocking pool; writes touch the disk and
/// large queries occupy rayon workers.
pub async fn with_kb<T, F>(state: &Arc<AppState>, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&KnowledgeBase) -> QaResult<T> + Send + 'static,
    T: Send + 'static,
{
    let kb = Arc::clone(&state.kb);
    tokio::task::spawn_blocking(move || op(&kb))
        .await
        .map_err(|e| ApiError::internal(format!("worker failed: {}", e)))?
        .map_err(ApiError::from)
}
