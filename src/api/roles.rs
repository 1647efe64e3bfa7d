//! Role API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_admin, success, ApiResult};
use crate::auth::Caller;
use crate::models::{AssignRoleRequest, UserRole};
use crate::AppState;

/// GET /api/role - Get the caller's role. Guests get `guest`.
pub async fn get_caller_role(State(state): State<AppState>, caller: Caller) -> ApiResult<UserRole> {
    let role = match caller.0.as_deref() {
        Some(user) => state.repo.get_role(user).await?,
        None => UserRole::Guest,
    };
    success(role)
}

/// GET /api/is-admin - Whether the caller is a moderator. Guests get false.
pub async fn is_caller_admin(State(state): State<AppState>, caller: Caller) -> ApiResult<bool> {
    let is_admin = match caller.0.as_deref() {
        Some(user) => state.repo.is_admin(user).await?,
        None => false,
    };
    success(is_admin)
}

/// PUT /api/users/:id/role - Assign a role to a user (moderators only).
pub async fn assign_role(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
    Json(request): Json<AssignRoleRequest>,
) -> ApiResult<()> {
    require_admin(&state, &caller).await?;
    state.repo.assign_role(&user_id, request.role).await?;

    tracing::info!(user = %user_id, role = request.role.as_str(), "role assigned");
    success(())
}
