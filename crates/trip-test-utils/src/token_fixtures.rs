//! Token fixtures for auth tests.
//!
//! Builds access tokens outside the service's own issuance path, so tests can
//! produce expired tokens, foreign-signature tokens, and other shapes the
//! service would never mint for itself.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::server_harness::TEST_JWT_SECRET;

/// Secret that no test server uses; tokens signed with it fail verification.
pub const FOREIGN_JWT_SECRET: &str = "foreign-secret-0123456789abcdef-01234";

/// Subject every test server validates against (the config default).
pub const TEST_TOKEN_SUBJECT: &str = "trip-backend";

/// A string that is not a JWT at all.
pub const MALFORMED_TOKEN: &str = "not-a-jwt";

fn sign(secret: &str, claims: &serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to sign fixture token")
}

fn access_claims(user_id: i64, email: &str, exp: i64) -> serde_json::Value {
    serde_json::json!({
        "sub": TEST_TOKEN_SUBJECT,
        "exp": exp,
        "user_id": user_id,
        "email": email,
        "name": format!("User {user_id}"),
        "profile_image": "",
        "state": 1,
    })
}

/// An access token that expired two hours ago, signed with the test secret.
pub fn expired_access_token(user_id: i64, email: &str) -> String {
    let exp = chrono::Utc::now().timestamp() - 7200;
    sign(TEST_JWT_SECRET, &access_claims(user_id, email, exp))
}

/// A structurally valid, unexpired access token signed with the wrong key.
pub fn foreign_access_token(user_id: i64, email: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    sign(FOREIGN_JWT_SECRET, &access_claims(user_id, email, exp))
}

/// An unexpired, correctly signed token that carries no identity claims,
/// shaped like a refresh token.
pub fn identityless_token() -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    sign(
        TEST_JWT_SECRET,
        &serde_json::json!({ "sub": TEST_TOKEN_SUBJECT, "exp": exp }),
    )
}
