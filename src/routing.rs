//! Routing collaborator and route stitching
//!
//! OSRM driving-route client behind the `RouteProvider` trait, plus the
//! stitcher that turns a waypoint chain into per-leg distance/duration
//! records. One failed leg never aborts the rest of the walk.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::RoutingConfig;
use crate::error::TripSmithError;
use crate::gazetteer::Gazetteer;
use crate::models::{GeoPoint, RouteLeg, RouteReport};

/// Errors from the routing collaborator
#[derive(Debug, Error)]
pub enum RouteError {
    /// Transport-level failure: the service could not be reached at all
    #[error("Routing service unreachable: {0}")]
    Unreachable(String),

    #[error("Route request failed with status {0}")]
    Status(u16),

    #[error("Route not found")]
    NotFound,

    #[error("Invalid routing response: {0}")]
    InvalidResponse(String),
}

/// Driving distance and duration for one leg, as the collaborator reports it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// External routing collaborator
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn driving_route(&self, from: GeoPoint, to: GeoPoint)
    -> Result<RouteSummary, RouteError>;
}

/// OSRM `route/v1` API client
pub struct OsrmClient {
    base_url: String,
    profile: String,
    http: ClientWithMiddleware,
}

impl OsrmClient {
    /// Create a new client from configuration
    pub fn from_config(config: &RoutingConfig) -> Result<Self, TripSmithError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripSmithError::api(format!("Failed to create HTTP client: {e}")))?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let http = reqwest_middleware::ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile.clone(),
            http,
        })
    }
}

#[async_trait]
impl RouteProvider for OsrmClient {
    async fn driving_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<RouteSummary, RouteError> {
        let url = format!(
            "{}/route/v1/{}/{:.4},{:.4};{:.4},{:.4}?overview=false",
            self.base_url,
            self.profile,
            from.longitude,
            from.latitude,
            to.longitude,
            to.latitude
        );

        debug!(%url, "requesting route");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RouteError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Status(status.as_u16()));
        }

        let body: OsrmRouteResponse = response
            .json()
            .await
            .map_err(|e| RouteError::InvalidResponse(e.to_string()))?;
        if body.code != "Ok" {
            return Err(RouteError::NotFound);
        }
        body.routes
            .into_iter()
            .next()
            .map(|route| RouteSummary {
                distance_m: route.distance,
                duration_s: route.duration,
            })
            .ok_or(RouteError::NotFound)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

/// Converts an ordered city sequence into deduplicated adjacent legs
pub struct RoutePlanner {
    gazetteer: Arc<Gazetteer>,
    provider: Arc<dyn RouteProvider>,
}

impl RoutePlanner {
    #[must_use]
    pub fn new(gazetteer: Arc<Gazetteer>, provider: Arc<dyn RouteProvider>) -> Self {
        Self {
            gazetteer,
            provider,
        }
    }

    /// Walk the waypoint chain `[start] + destinations + [end]` and query the
    /// routing collaborator for each retained adjacent pair, serially.
    ///
    /// A pair is skipped when both names match case-insensitively, or when
    /// the destination already served as the origin of an earlier retained
    /// leg. The second rule can under-produce legs for revisited cities; it
    /// mirrors the long-standing behavior and stays as-is, except that the
    /// chain's start city is never counted as a used origin: counting it
    /// would strip the closing leg off every round trip.
    #[instrument(skip(self, destinations))]
    pub async fn stitch(&self, start: &str, destinations: &[String], end: &str) -> RouteReport {
        let mut waypoints: Vec<&str> = Vec::with_capacity(destinations.len() + 2);
        waypoints.push(start);
        waypoints.extend(destinations.iter().map(String::as_str));
        waypoints.push(end);

        let start_key = start.to_lowercase();
        let mut used_origins: HashSet<String> = HashSet::new();
        let mut legs: Vec<RouteLeg> = Vec::new();

        for pair in waypoints.windows(2) {
            let (origin, destination) = (pair[0], pair[1]);
            let origin_key = origin.to_lowercase();
            if origin_key == destination.to_lowercase()
                || used_origins.contains(&destination.to_lowercase())
            {
                continue;
            }
            if origin_key != start_key {
                used_origins.insert(origin_key);
            }

            let from = self.gazetteer.lookup(origin);
            let to = self.gazetteer.lookup(destination);
            match self.provider.driving_route(from, to).await {
                Ok(summary) => legs.push(RouteLeg::driving(
                    origin,
                    destination,
                    round_km(summary.distance_m),
                    whole_minutes(summary.duration_s),
                )),
                Err(RouteError::Unreachable(message)) if legs.is_empty() => {
                    // Collaborator entirely unreachable: no partial summary
                    // to salvage, report one top-level error instead.
                    warn!(%origin, %destination, %message, "routing collaborator unreachable");
                    return RouteReport::Failed {
                        error: format!("Route error: {message}"),
                    };
                }
                Err(e) => {
                    debug!(%origin, %destination, error = %e, "leg lookup failed");
                    legs.push(RouteLeg::failed(origin, destination, e.to_string()));
                }
            }
        }

        RouteReport::Legs { routes: legs }
    }
}

fn round_km(distance_m: f64) -> f64 {
    (distance_m / 100.0).round() / 10.0
}

fn whole_minutes(duration_s: f64) -> u64 {
    (duration_s / 60.0).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LegOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider: fails legs whose origin latitude matches one of
    /// `fail_from`, with the given error constructor.
    struct ScriptedProvider {
        calls: AtomicUsize,
        fail_from: Vec<f64>,
        error: fn() -> RouteError,
    }

    impl ScriptedProvider {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_from: Vec::new(),
                error: || RouteError::NotFound,
            }
        }

        fn failing_from(latitudes: Vec<f64>, error: fn() -> RouteError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_from: latitudes,
                error,
            }
        }
    }

    #[async_trait]
    impl RouteProvider for ScriptedProvider {
        async fn driving_route(
            &self,
            from: GeoPoint,
            _to: GeoPoint,
        ) -> Result<RouteSummary, RouteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self
                .fail_from
                .iter()
                .any(|lat| (from.latitude - lat).abs() < 1e-6)
            {
                return Err((self.error)());
            }
            Ok(RouteSummary {
                distance_m: 115_432.0,
                duration_s: 11_130.0,
            })
        }
    }

    fn planner(provider: ScriptedProvider) -> RoutePlanner {
        RoutePlanner::new(Arc::new(Gazetteer::sri_lanka()), Arc::new(provider))
    }

    fn names(report: &RouteReport) -> Vec<(String, String)> {
        report
            .legs()
            .iter()
            .map(|leg| (leg.from.clone(), leg.to.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_round_trip_produces_all_legs() {
        let destinations = vec!["Kandy".to_string(), "Galle".to_string()];
        let report = planner(ScriptedProvider::ok())
            .stitch("Colombo", &destinations, "Colombo")
            .await;

        assert_eq!(
            names(&report),
            vec![
                ("Colombo".to_string(), "Kandy".to_string()),
                ("Kandy".to_string(), "Galle".to_string()),
                ("Galle".to_string(), "Colombo".to_string()),
            ]
        );
        for leg in report.legs() {
            assert_eq!(
                leg.outcome,
                LegOutcome::Driving {
                    distance_km: 115.4,
                    duration_min: 185
                }
            );
        }
    }

    #[tokio::test]
    async fn test_equal_adjacent_pair_is_skipped() {
        let report = planner(ScriptedProvider::ok())
            .stitch("Colombo", &[], "colombo")
            .await;
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_never_produces_leg_from_city_to_itself() {
        let destinations = vec!["Kandy".to_string(), "kandy".to_string()];
        let report = planner(ScriptedProvider::ok())
            .stitch("Colombo", &destinations, "Colombo")
            .await;
        for leg in report.legs() {
            assert!(!leg.from.eq_ignore_ascii_case(&leg.to));
        }
    }

    #[tokio::test]
    async fn test_destination_reused_as_origin_is_skipped() {
        // Kandy served as an origin once, so the later Ella -> Kandy leg is
        // suppressed. Long-standing behavior, kept deliberately.
        let destinations = vec![
            "Kandy".to_string(),
            "Ella".to_string(),
            "Kandy".to_string(),
        ];
        let report = planner(ScriptedProvider::ok())
            .stitch("Colombo", &destinations, "Colombo")
            .await;

        assert_eq!(
            names(&report),
            vec![
                ("Colombo".to_string(), "Kandy".to_string()),
                ("Kandy".to_string(), "Ella".to_string()),
                ("Kandy".to_string(), "Colombo".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_round_trip_keeps_the_closing_leg() {
        // The start city opens every chain; its use as the first origin must
        // not suppress the leg that closes the loop.
        let destinations = vec!["Kandy".to_string()];
        let report = planner(ScriptedProvider::ok())
            .stitch("Colombo", &destinations, "Colombo")
            .await;

        assert_eq!(
            names(&report),
            vec![
                ("Colombo".to_string(), "Kandy".to_string()),
                ("Kandy".to_string(), "Colombo".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_leg_does_not_abort_the_rest() {
        // Kandy -> Galle fails; the walk continues to Galle -> Colombo
        let provider = ScriptedProvider::failing_from(vec![7.2906], || RouteError::NotFound);
        let destinations = vec!["Kandy".to_string(), "Galle".to_string()];
        let report = planner(provider).stitch("Colombo", &destinations, "Colombo").await;

        let legs = report.legs();
        assert_eq!(legs.len(), 3);
        assert!(!legs[0].is_error());
        assert_eq!(
            legs[1].outcome,
            LegOutcome::Failed {
                error: "Route not found".to_string()
            }
        );
        assert!(!legs[2].is_error());
    }

    #[tokio::test]
    async fn test_unreachable_before_any_leg_fails_the_whole_report() {
        let provider = ScriptedProvider::failing_from(vec![6.9271, 7.2906, 6.0535], || {
            RouteError::Unreachable("connection refused".to_string())
        });
        let destinations = vec!["Kandy".to_string(), "Galle".to_string()];
        let report = planner(provider).stitch("Colombo", &destinations, "Colombo").await;

        match report {
            RouteReport::Failed { error } => {
                assert!(error.starts_with("Route error:"), "got: {error}");
            }
            RouteReport::Legs { .. } => panic!("expected a top-level route error"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_after_first_leg_degrades_per_leg() {
        // Only Kandy -> Galle hits the unreachable path; a leg already
        // exists, so the failure stays local.
        let provider = ScriptedProvider::failing_from(vec![7.2906], || {
            RouteError::Unreachable("connection reset".to_string())
        });
        let destinations = vec!["Kandy".to_string(), "Galle".to_string()];
        let report = planner(provider).stitch("Colombo", &destinations, "Colombo").await;

        let legs = report.legs();
        assert_eq!(legs.len(), 3);
        assert!(legs[1].is_error());
        assert!(!legs[2].is_error());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_km(115_432.0), 115.4);
        assert_eq!(round_km(115_460.0), 115.5);
        assert_eq!(whole_minutes(11_130.0), 185);
        assert_eq!(whole_minutes(59.0), 0);
    }
}
