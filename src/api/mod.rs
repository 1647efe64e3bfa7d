//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod guidance;
mod profiles;
mod questions;
mod reports;
mod roles;

pub use guidance::*;
pub use profiles::*;
pub use questions::*;
pub use reports::*;
pub use roles::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Resolve the caller's principal, requiring the admin (moderator) role.
pub async fn require_admin(state: &AppState, caller: &Caller) -> Result<String, AppError> {
    let user = caller.require()?.to_string();
    if state.repo.is_admin(&user).await? {
        Ok(user)
    } else {
        Err(AppError::Forbidden(
            "Moderator access required".to_string(),
        ))
    }
}
