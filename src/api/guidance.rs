//! Community guidance text endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::AppState;

/// GET /api/guidance - The guidance text shown on the home and ask pages.
pub async fn get_guidance_text(State(state): State<AppState>) -> ApiResult<String> {
    success(state.config.guidance_text.clone())
}
