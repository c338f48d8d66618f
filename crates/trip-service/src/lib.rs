//! Trip Service Library
//!
//! Core functionality for the trip-backend group travel-planning service:
//!
//! - Travel group lifecycle (create, list, update, delete, admin delegation)
//! - Membership (invite, accept, leave)
//! - Destination selection (province -> city -> random pick)
//! - Travel period and day-by-day itinerary management
//! - Travelogues (trip journals) with image upload
//! - Token issuance and validation (HS256 access/refresh pair)
//!
//! # Architecture
//!
//! The service follows the Handler -> Service -> Repository pattern:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/*.rs -> repositories/*.rs
//! ```
//!
//! # Modules
//!
//! - `auth` - Token provider, claims, and auth cookies
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Request authentication
//! - `models` - Data models
//! - `repositories` - In-memory stores
//! - `routes` - Axum router setup
//! - `services` - Business rules

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
