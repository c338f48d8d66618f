//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports types from the [`secrecy`] crate. Use these for all sensitive
//! values: the JWT signing secret, user passwords, and issued tokens.
//!
//! `SecretString` implements `Debug` with redaction, so any struct deriving
//! `Debug` on a field of this type gets safe logging behavior for free, and
//! the value is zeroized on drop. Access requires an explicit
//! `expose_secret()` call.
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct LoginRequest {
//!     email: String,
//!     password: SecretString,
//! }
//!
//! let req = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! // Safe: password renders as [REDACTED]
//! let rendered = format!("{req:?}");
//! assert!(!rendered.contains("hunter2"));
//!
//! // Explicit access only
//! let password: &str = req.password.expose_secret();
//! assert_eq!(password, "hunter2");
//! ```

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};
