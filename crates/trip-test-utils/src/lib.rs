//! # Trip Test Utilities
//!
//! Shared test utilities for the trip service.
//!
//! This crate provides:
//! - Server test harness (`TestTripServer` for E2E tests)
//! - Token fixtures (expired and foreign-key tokens for auth tests)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trip_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestTripServer::spawn().await?;
//!     let client = reqwest::Client::new();
//!
//!     let response = client
//!         .get(format!("{}/v1/health", server.url()))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;
pub mod token_fixtures;

// Re-export commonly used items
pub use server_harness::*;
pub use token_fixtures::*;
