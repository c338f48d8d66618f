//! Authentication: token issuance/validation, claims, and auth cookies.

pub mod claims;
pub mod cookies;
pub mod jwt;

pub use claims::{AccessTokenClaims, UserIdentity};
pub use jwt::TokenProvider;
