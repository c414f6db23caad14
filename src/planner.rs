//! Itinerary orchestration
//!
//! Validates the trip request, assembles the generation prompt, invokes the
//! external collaborators, and bundles plan text, destinations, and routes.
//! No collaborator failure surfaces as an error here; everything degrades to
//! data the caller can render.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::PlannerConfig;
use crate::extract::{DayHeaderMiner, DestinationMiner};
use crate::gazetteer::Gazetteer;
use crate::generate::{GeminiClient, TextGenerator};
use crate::memory::ConversationMemory;
use crate::models::{RouteReport, TripPlan, TripRequest};
use crate::prompt;
use crate::routing::{OsrmClient, RoutePlanner};

/// Returned as plan text when the request fails validation
pub const VALIDATION_MESSAGE: &str =
    "Invalid input: Check cities, budget (>10,000 LKR), or duration (1-14 days).";

/// Drives one itinerary generation end to end
pub struct TripPlanner {
    generator: Arc<dyn TextGenerator>,
    miner: Box<dyn DestinationMiner>,
    routes: RoutePlanner,
}

impl TripPlanner {
    #[must_use]
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        miner: Box<dyn DestinationMiner>,
        routes: RoutePlanner,
    ) -> Self {
        Self {
            generator,
            miner,
            routes,
        }
    }

    /// Wire up the production collaborators from configuration
    pub fn from_config(config: &PlannerConfig) -> crate::Result<Self> {
        let gazetteer = Arc::new(Gazetteer::sri_lanka());
        let generator = Arc::new(GeminiClient::from_config(&config.generation)?);
        let provider = Arc::new(OsrmClient::from_config(&config.routing)?);
        let miner = Box::new(DayHeaderMiner::new(Arc::clone(&gazetteer)));
        Ok(Self::new(
            generator,
            miner,
            RoutePlanner::new(gazetteer, provider),
        ))
    }

    /// Generate a plan bundle for one request.
    ///
    /// Invalid requests are answered with a fixed validation message before
    /// any collaborator is contacted. The memory turn is committed only for
    /// successful generations, but extraction and stitching always run over
    /// whatever text came back.
    #[instrument(skip_all, fields(start = %request.start_city, end = %request.end_city))]
    pub async fn generate(
        &self,
        memory: &mut ConversationMemory,
        request: &TripRequest,
    ) -> TripPlan {
        if !request.is_valid() {
            debug!("rejecting request before any collaborator call");
            return TripPlan {
                plan: VALIDATION_MESSAGE.to_string(),
                destinations: Vec::new(),
                routes: RouteReport::default(),
            };
        }

        let prompt = prompt::build_prompt(request, &memory.history());
        let plan = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "itinerary generation failed");
                format!("Error: {e}")
            }
        };

        if !plan.starts_with("Error") {
            memory.record(request.notes.clone(), plan.clone());
        }

        // Error text simply mines to an empty destination list.
        let destinations = self
            .miner
            .extract(&plan, &request.start_city, &request.end_city);
        let routes = self
            .routes
            .stitch(&request.start_city, &destinations, &request.end_city)
            .await;

        TripPlan {
            plan,
            destinations,
            routes,
        }
    }
}
