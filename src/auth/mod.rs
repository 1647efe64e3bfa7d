//! Gateway authentication and caller identity.
//!
//! Login itself is delegated to an external identity provider; the fronting
//! gateway forwards the verified principal in the `x-user-id` header. A
//! pre-shared key authenticates the gateway, compared in constant time to
//! mitigate timing attacks. Requests without a principal are guests.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, AppError, ErrorDetails, ErrorResponse};

/// Header name for the gateway API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header name carrying the authenticated principal.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The identity of the caller, if any. Inserted into request extensions by
/// [`identity_layer`] and read back by handlers via the extractor impl.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<String>);

impl Caller {
    /// The caller's principal, or an unauthorized error for guests.
    pub fn require(&self) -> Result<&str, AppError> {
        self.0
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Sign-in required".to_string()))
    }

    pub fn is_guest(&self) -> bool {
        self.0.is_none()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

/// Authentication layer: validates the gateway PSK and attaches the caller
/// identity to the request.
pub async fn identity_layer(expected_psk: Option<String>, mut request: Request, next: Next) -> Response {
    // If no PSK is configured, allow all requests (dev mode)
    if let Some(expected) = expected_psk {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .or_else(|| {
                // Also accept the key as a bearer token
                request
                    .headers()
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.strip_prefix("Bearer "))
                    .map(|s| s.to_string())
            });

        match provided {
            Some(key) if constant_time_compare(&key, &expected) => {}
            Some(_) => return unauthorized_response("Invalid API key"),
            None => return unauthorized_response("Missing or invalid API key"),
        }
    }

    let caller = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    request.extensions_mut().insert(Caller(caller));
    next.run(request).await
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_caller_require() {
        let guest = Caller(None);
        assert!(guest.is_guest());
        assert!(guest.require().is_err());

        let user = Caller(Some("principal-1".to_string()));
        assert_eq!(user.require().unwrap(), "principal-1");
    }
}
