//! Account registration and login.
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage
//! - Login always runs one bcrypt verification, against a dummy hash when the
//!   account does not exist, to keep timing uniform
//! - Failure responses never say whether the email or the password was wrong

use crate::auth::{TokenProvider, UserIdentity};
use crate::errors::ApiError;
use crate::models::{account_state, LoginRequest, SignupRequest};
use crate::repositories::users::UserRecord;
use crate::repositories::UsersRepository;
use common::jwt::TokenPair;
use common::secret::ExposeSecret;
use tracing::instrument;

/// Dummy bcrypt hash verified when the email is unknown (timing uniformity).
const DUMMY_BCRYPT_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

fn invalid_credentials() -> ApiError {
    ApiError::Forbidden("Invalid email or password".to_string())
}

/// Convert a stored account into the identity carried in token claims.
#[must_use]
pub fn identity_of(record: &UserRecord) -> UserIdentity {
    UserIdentity {
        user_id: record.id,
        email: record.email.clone(),
        name: record.name.clone(),
        profile_image: record.profile_image.clone(),
        state: record.state,
    }
}

/// Register a new account.
///
/// # Errors
///
/// - `ApiError::BadRequest` for malformed fields
/// - `ApiError::Conflict` if the email is already registered
/// - `ApiError::Internal` if password hashing fails
#[instrument(skip_all)]
pub async fn signup(users: &UsersRepository, request: SignupRequest) -> Result<UserRecord, ApiError> {
    request
        .validate()
        .map_err(ApiError::BadRequest)?;

    let password_hash = bcrypt::hash(request.password.expose_secret(), bcrypt::DEFAULT_COST)
        .map_err(|e| {
            tracing::error!(target: "trip.services.user", error = %e, "Password hashing failed");
            ApiError::Internal
        })?;

    users
        .insert(
            &request.email,
            request.name.trim(),
            request.profile_image.as_deref(),
            password_hash,
        )
        .await
}

/// Verify credentials and issue a token pair.
///
/// # Errors
///
/// - `ApiError::Forbidden` for unknown email, wrong password, or a dormant
///   account (all rendered with the same message except dormancy)
/// - `ApiError::Internal` if verification or signing fails
#[instrument(skip_all)]
pub async fn login(
    users: &UsersRepository,
    token_provider: &TokenProvider,
    request: LoginRequest,
) -> Result<(UserRecord, TokenPair), ApiError> {
    let account = users.find_by_email(&request.email).await;

    let hash_to_verify = match &account {
        Some(record) => record.password_hash.as_str(),
        None => DUMMY_BCRYPT_HASH,
    };

    let password_matches = bcrypt::verify(request.password.expose_secret(), hash_to_verify)
        .map_err(|e| {
            tracing::error!(target: "trip.services.user", error = %e, "Password verification failed");
            ApiError::Internal
        })?;

    let record = account.ok_or_else(invalid_credentials)?;
    if !password_matches {
        tracing::debug!(target: "trip.services.user", user_id = record.id, "Login rejected");
        return Err(invalid_credentials());
    }

    if record.state != account_state::ACTIVE {
        return Err(ApiError::Forbidden("Account is dormant".to_string()));
    }

    let pair = token_provider.issue_pair(&identity_of(&record))?;
    tracing::info!(target: "trip.services.user", user_id = record.id, "Login succeeded");

    Ok((record, pair))
}
