//! Stored result endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use practice_core::{GUEST_USER_ID, RECENT_PRACTICE_LIMIT};

use crate::error::Result;
use crate::models::{RecentResultsQuery, RecentResultsResponse};
use crate::AppState;

/// GET /api/results
/// Newest results for a user; guest results when no user is given
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentResultsQuery>,
) -> Result<Json<RecentResultsResponse>> {
    let user_id = query.user_id.unwrap_or_else(|| GUEST_USER_ID.to_string());
    let limit = query.limit.unwrap_or(RECENT_PRACTICE_LIMIT);

    let results = state.results.recent(&user_id, limit);

    Ok(Json(RecentResultsResponse { user_id, results }))
}
