//! Trip service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl and render
//! as a `{"message": "..."}` body. Token-validation failures carry the fixed
//! user-facing messages; expired tokens additionally clear the auth cookies.
//! Internal detail is logged server-side, never returned to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::cookies;

/// Trip service error type.
///
/// Maps to HTTP status codes:
/// - TokenExpired, TokenBadSignature, MissingToken: 401 Unauthorized
/// - TokenMalformed, TokenGeneric, TokenUnknown, BadRequest: 400 Bad Request
/// - NotFound: 404 Not Found
/// - Forbidden: 403 Forbidden
/// - Conflict: 409 Conflict
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Access token expiry timestamp is in the past. Clears auth cookies.
    #[error("토큰이 만료되었습니다.")]
    TokenExpired,

    /// Token string is not a structurally valid JWT.
    #[error("잘못된 토큰 형식입니다.")]
    TokenMalformed,

    /// Signature verification failed (wrong key or tampered token).
    #[error("유효하지 않은 토큰 서명입니다.")]
    TokenBadSignature,

    /// Any other error reported by the JWT library.
    #[error("JWT 관련 오류가 발생했습니다.")]
    TokenGeneric,

    /// Token verified but claim projection failed.
    #[error("JWT 처리 중 오류가 발생했습니다.")]
    TokenUnknown,

    /// No credentials supplied on a protected route.
    #[error("인증 토큰이 필요합니다.")]
    MissingToken,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("An internal error occurred")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TokenExpired | ApiError::TokenBadSignature | ApiError::MissingToken => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::TokenMalformed
            | ApiError::TokenGeneric
            | ApiError::TokenUnknown
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(target: "trip.errors", error = %self, "Request failed");
        } else {
            tracing::debug!(target: "trip.errors", error = %self, status = %status, "Request rejected");
        }

        let mut response = (status, Json(ErrorBody { message })).into_response();

        // Expired tokens invalidate the client-side session cookies.
        if self == ApiError::TokenExpired {
            cookies::append_clearing_cookies(response.headers_mut());
        }

        response
    }
}
