//! Data models for the TripSmith application
//!
//! This module contains the core domain models organized by concern:
//! - Location: geographic coordinates
//! - Trip: request parameters, route legs, and the generated plan bundle

pub mod location;
pub mod trip;

// Re-export all public types for convenient access
pub use location::GeoPoint;
pub use trip::{
    LKR_PER_USD, LegOutcome, RouteLeg, RouteReport, TravelStyle, TripPlan, TripRequest,
};
