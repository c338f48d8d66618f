//! HTTP handlers for the trip service.
//!
//! Handlers are thin: extract, delegate to a service, shape the response.

pub mod auth;
pub mod groups;
pub mod health;
pub mod locations;
pub mod schedules;
pub mod travelogues;

pub use health::health_check;
