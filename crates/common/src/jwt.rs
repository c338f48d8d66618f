//! JWT utilities shared across the trip-backend services.
//!
//! This module provides:
//! - Size limits for DoS prevention
//! - Access/refresh token lifetimes
//! - The token pair returned to clients after authentication
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - The pair is a transport value object only; tokens are never logged

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// JWTs larger than this are rejected BEFORE any base64 decoding or signature
/// verification. Typical access tokens here are well under 1KB; the limit only
/// exists to bound resource usage for hostile input.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Access token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Refresh token lifetime in seconds (100 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 100;

/// Cookie name carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie name carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

// =============================================================================
// Error Types
// =============================================================================

/// Pre-parse token screening errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenScreenError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("token exceeds maximum allowed size")]
    TokenTooLarge,

    /// Token is not a three-part JWT compact serialization.
    #[error("token is not in JWT compact form")]
    NotCompactJwt,
}

// =============================================================================
// Token Pair
// =============================================================================

/// Access/refresh token pair issued on successful authentication.
///
/// Immutable after construction. Created once per authentication event and
/// serialized to the caller; the tokens are redacted in Debug output so the
/// pair can pass through instrumented code safely.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token (1 hour expiry, carries identity claims).
    pub access_token: String,

    /// Signed refresh token (100 day expiry, carries no identity claims).
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new pair from already-signed tokens.
    #[must_use]
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Screen a token string before handing it to the JWT library.
///
/// Checks the size bound first (DoS prevention), then the three-part compact
/// structure. This does NOT validate the signature; the token must still be
/// verified afterwards.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `NotCompactJwt` - token does not have exactly three dot-separated parts
pub fn screen_token(token: &str) -> Result<(), TokenScreenError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(TokenScreenError::TokenTooLarge);
    }

    let parts = token.split('.').count();
    if parts != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts,
            "Token rejected: not in JWT compact form"
        );
        return Err(TokenScreenError::NotCompactJwt);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
