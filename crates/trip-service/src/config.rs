//! Trip service configuration.
//!
//! Configuration is loaded from environment variables. The JWT signing secret
//! is held as a `SecretString` and never appears in Debug output.

use common::secret::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default token subject embedded in every issued JWT.
pub const DEFAULT_TOKEN_SUBJECT: &str = "trip-backend";

/// Minimum signing secret length in bytes.
///
/// HS256 keys shorter than the hash output weaken the MAC; reject them at
/// startup instead of issuing weak tokens.
pub const MIN_SECRET_KEY_BYTES: usize = 32;

/// Trip service configuration.
///
/// Loaded from environment variables with sensible defaults. The signing
/// secret is required and redacted in Debug output.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Shared secret for HS256 token signing.
    pub jwt_secret_key: SecretString,

    /// Subject (`sub`) claim stamped into every issued token.
    pub jwt_subject: String,
}

/// Custom Debug implementation that redacts the signing secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("jwt_secret_key", &"[REDACTED]")
            .field("jwt_subject", &self.jwt_subject)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT secret key: {0}")]
    InvalidSecretKey(String),

    #[error("Invalid JWT subject: {0}")]
    InvalidSubject(String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `JWT_SECRET_KEY` is missing or too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `JWT_SECRET_KEY` is missing or too short,
    /// or `JWT_SUBJECT` is set but empty.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let secret = vars
            .get("JWT_SECRET_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET_KEY".to_string()))?;

        if secret.len() < MIN_SECRET_KEY_BYTES {
            return Err(ConfigError::InvalidSecretKey(format!(
                "JWT_SECRET_KEY must be at least {} bytes, got {}",
                MIN_SECRET_KEY_BYTES,
                secret.len()
            )));
        }

        let jwt_subject = match vars.get("JWT_SUBJECT") {
            Some(subject) if subject.trim().is_empty() => {
                return Err(ConfigError::InvalidSubject(
                    "JWT_SUBJECT must not be empty".to_string(),
                ));
            }
            Some(subject) => subject.clone(),
            None => DEFAULT_TOKEN_SUBJECT.to_string(),
        };

        Ok(Config {
            bind_address,
            jwt_secret_key: SecretString::from(secret.clone()),
            jwt_subject,
        })
    }
}

impl Config {
    /// Expose the signing secret bytes for key derivation.
    #[must_use]
    pub fn secret_bytes(&self) -> &[u8] {
        self.jwt_secret_key.expose_secret().as_bytes()
    }
}
