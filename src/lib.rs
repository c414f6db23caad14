//! `TripSmith` - AI-assisted Sri Lanka travel itinerary planning
//!
//! This library provides the core functionality for itinerary generation,
//! destination mining, and route summarization, delegating text generation
//! and routing to external services.

pub mod activities;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod gazetteer;
pub mod generate;
pub mod meals;
pub mod memory;
pub mod models;
pub mod phrasebook;
pub mod planner;
pub mod prompt;
pub mod routing;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::TripSmithError;
pub use export::TripDocument;
pub use extract::{DayHeaderMiner, DestinationMiner};
pub use gazetteer::Gazetteer;
pub use generate::{GeminiClient, GenerationError, TextGenerator};
pub use memory::ConversationMemory;
pub use models::{GeoPoint, LegOutcome, RouteLeg, RouteReport, TravelStyle, TripPlan, TripRequest};
pub use planner::{TripPlanner, VALIDATION_MESSAGE};
pub use routing::{OsrmClient, RouteError, RoutePlanner, RouteProvider, RouteSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripSmithError>;
