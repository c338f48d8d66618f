//! Shared utilities for the trip-backend workspace.
//!
//! # Modules
//!
//! - `jwt` - Token size limits, lifetimes, and the access/refresh token pair
//! - `secret` - Secret wrappers for sensitive values (never logged)

pub mod jwt;
pub mod secret;
