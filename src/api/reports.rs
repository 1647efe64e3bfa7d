//! Report review endpoint for moderators.

use axum::extract::State;

use super::{require_admin, success, ApiResult};
use crate::auth::Caller;
use crate::models::Report;
use crate::AppState;

/// GET /api/reports - List filed reports, newest first (moderators only).
pub async fn list_reports(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<Report>> {
    require_admin(&state, &caller).await?;
    let reports = state.repo.list_reports().await?;
    success(reports)
}
