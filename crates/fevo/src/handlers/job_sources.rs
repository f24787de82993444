//! Source list handlers.
//!
//! - `GET /api/job-sources` returns the stored list as a JSON array.
//! - `POST /api/job-sources` replaces the whole list. The body carries the
//!   shared admin password next to the new list:
//!   `{"password": "...", "sources": [...]}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use fevo_core::sources::{ensure_unique_ids, JobSource};

use crate::{handlers::AppError, state::AppState};

const READ_FAILED: &str = "Failed to read job sources.";
const SAVE_FAILED: &str = "Failed to save job sources.";
const INVALID_SOURCES: &str = "Invalid sources format";

/// List all sources (GET /api/job-sources).
#[axum::debug_handler]
pub async fn list_sources(State(state): State<AppState>) -> Result<Json<Vec<JobSource>>, AppError> {
    let sources = state.store.load().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load sources");
        AppError::internal(READ_FAILED)
    })?;

    Ok(Json(sources))
}

/// Replace the source list (POST /api/job-sources).
///
/// The password is checked before the shape of `sources`, so an
/// unauthenticated caller learns nothing about the expected payload. A body
/// that is not JSON carries no password and is answered 401.
#[axum::debug_handler]
pub async fn save_sources(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let mut body = match payload {
        Ok(Json(body)) => body,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable request body");
            Value::Null
        }
    };

    match body.get("password").and_then(Value::as_str) {
        Some(password) if state.password_matches(password) => {}
        _ => return Err(AppError::unauthorized()),
    }

    let raw = match body.get_mut("sources") {
        Some(raw) if raw.is_array() => raw.take(),
        _ => return Err(AppError::bad_request(INVALID_SOURCES)),
    };
    let sources: Vec<JobSource> = serde_json::from_value(raw).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed source list");
        AppError::bad_request(INVALID_SOURCES)
    })?;
    ensure_unique_ids(&sources).map_err(|e| {
        tracing::debug!(error = %e, "Rejected source list");
        AppError::bad_request(INVALID_SOURCES)
    })?;

    state.store.save(&sources).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to save sources");
        AppError::internal(SAVE_FAILED)
    })?;

    tracing::info!(count = sources.len(), "Replaced source list");
    Ok(Json(json!({ "success": true })))
}
