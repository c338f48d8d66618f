//! Auth cookie handling.
//!
//! The token pair is mirrored into two HTTP-only cookies (`accessToken`,
//! `refreshToken`). Expiry detection clears both by re-setting them with
//! `Max-Age=0`.

use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use common::jwt::{TokenPair, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use common::jwt::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};

fn build_cookie(name: &str, value: &str, max_age: i64) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

fn append_cookie(headers: &mut HeaderMap, cookie: &str) {
    // Header values built from token material are always visible ASCII; a
    // parse failure here means a corrupt token, which we drop rather than
    // panic on.
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.append(SET_COOKIE, value);
    } else {
        tracing::warn!(target: "trip.auth.cookies", "Dropped unrepresentable Set-Cookie value");
    }
}

/// Set both auth cookies from a freshly issued pair.
pub fn append_auth_cookies(headers: &mut HeaderMap, pair: &TokenPair) {
    append_cookie(
        headers,
        &build_cookie(ACCESS_TOKEN_COOKIE, &pair.access_token, ACCESS_TOKEN_TTL_SECS),
    );
    append_cookie(
        headers,
        &build_cookie(
            REFRESH_TOKEN_COOKIE,
            &pair.refresh_token,
            REFRESH_TOKEN_TTL_SECS,
        ),
    );
}

/// Clear both auth cookies (empty value, `Max-Age=0`).
pub fn append_clearing_cookies(headers: &mut HeaderMap) {
    append_cookie(headers, &build_cookie(ACCESS_TOKEN_COOKIE, "", 0));
    append_cookie(headers, &build_cookie(REFRESH_TOKEN_COOKIE, "", 0));
}

/// Extract the access token from a request's Cookie headers, if present.
#[must_use]
pub fn access_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(access_token_from_cookie_header)
}

fn access_token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("accessToken="))
        .filter(|token| !token.is_empty())
}
