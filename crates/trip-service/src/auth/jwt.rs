//! Token issuance and validation for the trip service.
//!
//! Issues HS256-signed access/refresh pairs from a single shared secret and
//! classifies validation failures into the service error taxonomy.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Only HS256 is accepted when decoding
//! - The signing key is derived once from the configured secret and cached

use crate::auth::claims::{AccessTokenClaims, UserIdentity};
use crate::config::Config;
use crate::errors::ApiError;
use common::jwt::{screen_token, TokenPair, ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Refresh tokens carry no identity claims, only subject and expiry.
#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: String,
    exp: i64,
}

/// Cached key material derived from the configured secret.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and validates the access/refresh token pair.
///
/// One instance lives in the application state for the life of the process.
/// Key derivation is lazy and idempotent: the first caller initializes the
/// cache, later callers reuse it.
pub struct TokenProvider {
    secret: SecretString,
    subject: String,
    keys: OnceLock<Keys>,
}

impl TokenProvider {
    /// Create a provider from the service configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            secret: config.jwt_secret_key.clone(),
            subject: config.jwt_subject.clone(),
            keys: OnceLock::new(),
        }
    }

    fn keys(&self) -> &Keys {
        self.keys.get_or_init(|| {
            let secret = self.secret.expose_secret().as_bytes();
            Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.sub = Some(self.subject.clone());
        validation
    }

    /// Issue an access/refresh pair for an authenticated user.
    ///
    /// The access token carries the identity claims and expires after one
    /// hour; the refresh token carries no identity and expires after 100
    /// days.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if signing fails.
    pub fn issue_pair(&self, identity: &UserIdentity) -> Result<TokenPair, ApiError> {
        let now = chrono::Utc::now().timestamp();

        let access_claims = AccessTokenClaims {
            sub: self.subject.clone(),
            exp: now + ACCESS_TOKEN_TTL_SECS,
            identity: identity.clone(),
        };
        let refresh_claims = RefreshClaims {
            sub: self.subject.clone(),
            exp: now + REFRESH_TOKEN_TTL_SECS,
        };

        let header = Header::new(Algorithm::HS256);
        let access_token =
            encode(&header, &access_claims, &self.keys().encoding).map_err(|e| {
                tracing::error!(target: "trip.auth.jwt", error = %e, "Failed to sign access token");
                ApiError::Internal
            })?;
        let refresh_token =
            encode(&header, &refresh_claims, &self.keys().encoding).map_err(|e| {
                tracing::error!(target: "trip.auth.jwt", error = %e, "Failed to sign refresh token");
                ApiError::Internal
            })?;

        tracing::debug!(
            target: "trip.auth.jwt",
            user_id = identity.user_id,
            "Issued token pair"
        );

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Check that a token parses and its signature verifies.
    ///
    /// All error detail is swallowed; callers only learn pass/fail. The check
    /// is read-only and idempotent.
    #[must_use]
    pub fn validate(&self, token: &str) -> bool {
        if screen_token(token).is_err() {
            return false;
        }

        decode::<serde_json::Value>(token, &self.keys().decoding, &self.validation()).is_ok()
    }

    /// Decode an access token into its claims.
    ///
    /// # Errors
    ///
    /// Classifies failures into the token error taxonomy:
    /// - `TokenExpired` - expiry timestamp in the past
    /// - `TokenMalformed` - not a structurally valid JWT
    /// - `TokenBadSignature` - signature verification failed
    /// - `TokenUnknown` - verified but claim projection failed
    /// - `TokenGeneric` - any other JWT library error
    pub fn decode_access(&self, token: &str) -> Result<AccessTokenClaims, ApiError> {
        screen_token(token).map_err(|e| {
            tracing::debug!(target: "trip.auth.jwt", error = %e, "Token failed pre-parse screening");
            ApiError::TokenMalformed
        })?;

        let data = decode::<AccessTokenClaims>(token, &self.keys().decoding, &self.validation())
            .map_err(|e| {
                tracing::debug!(target: "trip.auth.jwt", error = %e, "Token validation failed");
                classify_jwt_error(e.kind())
            })?;

        Ok(data.claims)
    }
}

/// Map a JWT library error onto the service taxonomy.
fn classify_jwt_error(kind: &ErrorKind) -> ApiError {
    match kind {
        ErrorKind::ExpiredSignature => ApiError::TokenExpired,
        ErrorKind::InvalidSignature => ApiError::TokenBadSignature,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
            ApiError::TokenMalformed
        }
        ErrorKind::Json(_) => ApiError::TokenUnknown,
        _ => ApiError::TokenGeneric,
    }
}
