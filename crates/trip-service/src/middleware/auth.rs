//! Authentication middleware for protected routes.
//!
//! Resolves the caller's access token from the Authorization header or the
//! `accessToken` cookie, decodes it, and injects the claims into request
//! extensions for handlers.

use crate::auth::{cookies, TokenProvider};
use crate::errors::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Shared token provider.
    pub token_provider: Arc<TokenProvider>,
}

/// Authentication middleware that validates access tokens.
///
/// Token resolution order:
/// 1. `Authorization: Bearer <token>` header
/// 2. `accessToken` cookie
///
/// On success the decoded claims are stored in request extensions. Failures
/// map straight to the token error taxonomy (expired tokens additionally
/// clear the auth cookies via `ApiError`'s response mapping).
#[instrument(skip_all, name = "trip.middleware.auth")]
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let bearer = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match bearer.or_else(|| cookies::access_token_from_headers(req.headers())) {
        Some(token) => token,
        None => {
            tracing::debug!(target: "trip.middleware.auth", "No credentials on protected route");
            return Err(ApiError::MissingToken);
        }
    };

    let claims = state.token_provider.decode_access(token)?;

    // Store claims in request extensions for downstream handlers.
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
