// crates/addrdb-server/src/handlers.rs
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// `GET {prefix}search/{query}`
///
/// Responds with a JSON array of at most `max_results` addresses. Queries
/// shorter than the configured minimum are rejected before the lookup runs.
pub async fn search_addresses(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Response, ApiError> {
    if query.chars().count() < state.min_query_length {
        return Err(ApiError::query_too_short(state.min_query_length));
    }

    let hits = state.lookup.search(&query);
    tracing::debug!(query = %query, hits = hits.len(), "search");
    Ok(Json(hits).into_response())
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
