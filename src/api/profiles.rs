//! User profile API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::UserProfile;
use crate::AppState;

/// GET /api/profile - Get the caller's profile. Returns null when no
/// profile exists yet; the UI uses this to prompt profile creation.
pub async fn get_caller_profile(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Option<UserProfile>> {
    let user = caller.require()?;
    let profile = state.repo.get_profile(user).await?;
    success(profile)
}

/// PUT /api/profile - Create or update the caller's profile.
pub async fn save_caller_profile(
    State(state): State<AppState>,
    caller: Caller,
    Json(profile): Json<UserProfile>,
) -> ApiResult<UserProfile> {
    let user = caller.require()?;

    if profile.display_name.trim().is_empty() {
        return Err(AppError::Validation("Display name is required".to_string()));
    }

    state.repo.save_profile(user, &profile).await?;
    success(profile)
}

/// GET /api/users/:id/profile - Get another user's profile.
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Option<UserProfile>> {
    let profile = state.repo.get_profile(&user_id).await?;
    success(profile)
}
