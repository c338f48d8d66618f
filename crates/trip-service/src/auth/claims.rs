//! Access token claims.
//!
//! The identity payload embedded in signed access tokens. Claims must
//! round-trip exactly through encode -> decode. Email is redacted in Debug
//! output to keep personal data out of logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity fields stamped into an access token.
///
/// This is the projection of a user record that travels inside the token;
/// it never includes credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Numeric user identifier.
    pub user_id: i64,

    /// Account email - redacted in Debug output.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Profile image reference.
    pub profile_image: String,

    /// Account state (see `models::account_state`).
    pub state: i32,
}

impl fmt::Debug for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserIdentity")
            .field("user_id", &self.user_id)
            .field("email", &"[REDACTED]")
            .field("name", &self.name)
            .field("profile_image", &self.profile_image)
            .field("state", &self.state)
            .finish()
    }
}

/// Full claims set of a decoded access token.
///
/// Registered claims (`sub`, `exp`) plus the flattened identity fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Token subject (configured issuer-wide string).
    pub sub: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Identity payload.
    #[serde(flatten)]
    pub identity: UserIdentity,
}

impl AccessTokenClaims {
    /// Numeric user identifier carried in the token.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.identity.user_id
    }
}

impl fmt::Debug for AccessTokenClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenClaims")
            .field("sub", &self.sub)
            .field("exp", &self.exp)
            .field("identity", &self.identity)
            .finish()
    }
}
