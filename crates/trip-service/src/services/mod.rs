//! Service layer for the trip service.
//!
//! Business rules live here, between the handlers and the repositories.
//! Services are free functions taking their dependencies as arguments.

pub mod group_service;
pub mod location_service;
pub mod schedule_service;
pub mod travelogue_service;
pub mod user_service;
