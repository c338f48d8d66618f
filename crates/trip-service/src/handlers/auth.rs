//! Authentication handlers.
//!
//! - `POST /auth/signup` - register an account
//! - `POST /auth/login` - verify credentials, issue the token pair
//! - `POST /auth/logout` - clear the auth cookies
//!
//! Login returns the pair as JSON and mirrors it into the `accessToken` /
//! `refreshToken` HTTP-only cookies, so both header-based and cookie-based
//! clients work.

use crate::auth::cookies;
use crate::errors::ApiError;
use crate::models::{LoginRequest, SignupRequest, SignupResponse};
use crate::routes::AppState;
use crate::services::user_service;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Handler for POST /auth/signup
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let record = user_service::signup(&state.stores.users, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: record.id,
        }),
    ))
}

/// Handler for POST /auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (_, pair) =
        user_service::login(&state.stores.users, &state.token_provider, request).await?;

    let mut response = Json(pair.clone()).into_response();
    cookies::append_auth_cookies(response.headers_mut(), &pair);
    Ok(response)
}

/// Handler for POST /auth/logout
///
/// Stateless: tokens are not revocable, so logout just clears the cookies.
#[instrument(skip_all)]
pub async fn logout() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    cookies::append_clearing_cookies(response.headers_mut());
    response
}
