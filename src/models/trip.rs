//! Trip request, route leg, and plan bundle models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed conversion applied once when the budget is collected.
pub const LKR_PER_USD: u64 = 300;

/// Travel style requested for the itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelStyle {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The wording the prompt template and the form selector use
        let label = match self {
            TravelStyle::Budget => "Budget",
            TravelStyle::MidRange => "Mid-range",
            TravelStyle::Luxury => "Luxury",
        };
        write!(f, "{label}")
    }
}

impl FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(TravelStyle::Budget),
            "mid-range" | "midrange" | "mid" => Ok(TravelStyle::MidRange),
            "luxury" => Ok(TravelStyle::Luxury),
            other => Err(format!(
                "Unknown travel style '{other}'. Expected budget, mid-range, or luxury."
            )),
        }
    }
}

/// Parameters for one itinerary generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub start_city: String,
    pub end_city: String,
    /// Trip length in days, valid range 1-14
    pub duration_days: u32,
    /// Budget ceiling in Sri Lankan rupees, must exceed 10,000
    pub budget_lkr: u64,
    /// Free-text interests, e.g. "Culture, Beach"
    pub interests: String,
    pub style: TravelStyle,
    /// Free-form user notes forwarded verbatim to the generator
    pub notes: String,
}

impl TripRequest {
    /// Budget floor in rupees; requests at or below it are rejected
    pub const MIN_BUDGET_LKR: u64 = 10_000;
    /// Longest supported trip in days
    pub const MAX_DURATION_DAYS: u32 = 14;

    /// Whether this request may be sent to the external collaborators
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.start_city.trim().is_empty()
            && !self.end_city.trim().is_empty()
            && self.budget_lkr > Self::MIN_BUDGET_LKR
            && (1..=Self::MAX_DURATION_DAYS).contains(&self.duration_days)
    }
}

/// One directed hop between adjacent waypoints in the chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub outcome: LegOutcome,
}

impl RouteLeg {
    #[must_use]
    pub fn driving(
        from: impl Into<String>,
        to: impl Into<String>,
        distance_km: f64,
        duration_min: u64,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            outcome: LegOutcome::Driving {
                distance_km,
                duration_min,
            },
        }
    }

    #[must_use]
    pub fn failed(from: impl Into<String>, to: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            outcome: LegOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Whether this leg carries an error record instead of route figures
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, LegOutcome::Failed { .. })
    }
}

/// Outcome of querying the routing collaborator for one leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LegOutcome {
    /// Distance rounded to 0.1 km, duration floored to whole minutes
    Driving { distance_km: f64, duration_min: u64 },
    /// The collaborator could not produce a route for this leg
    Failed { error: String },
}

/// Route summary mirroring the waypoint chain, or a single error descriptor
/// when the routing collaborator could not be reached at all
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RouteReport {
    Legs { routes: Vec<RouteLeg> },
    Failed { error: String },
}

impl RouteReport {
    /// The leg list; empty when the whole stitch failed
    #[must_use]
    pub fn legs(&self) -> &[RouteLeg] {
        match self {
            RouteReport::Legs { routes } => routes,
            RouteReport::Failed { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs().is_empty()
    }
}

impl Default for RouteReport {
    fn default() -> Self {
        RouteReport::Legs { routes: Vec::new() }
    }
}

/// Result bundle of one itinerary generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    /// Generated itinerary text, a validation message, or error text
    pub plan: String,
    /// Ordered, duplicate-free cities mined from the plan text
    pub destinations: Vec<String>,
    pub routes: RouteReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(budget_lkr: u64, duration_days: u32) -> TripRequest {
        TripRequest {
            start_city: "Colombo".to_string(),
            end_city: "Colombo".to_string(),
            duration_days,
            budget_lkr,
            interests: "Culture".to_string(),
            style: TravelStyle::MidRange,
            notes: String::new(),
        }
    }

    #[rstest]
    #[case("budget", TravelStyle::Budget)]
    #[case("Mid-range", TravelStyle::MidRange)]
    #[case("MIDRANGE", TravelStyle::MidRange)]
    #[case("Luxury", TravelStyle::Luxury)]
    fn test_style_parsing(#[case] input: &str, #[case] expected: TravelStyle) {
        assert_eq!(input.parse::<TravelStyle>().unwrap(), expected);
    }

    #[test]
    fn test_style_parsing_rejects_unknown() {
        assert!("backpacker".parse::<TravelStyle>().is_err());
    }

    #[rstest]
    #[case(60_000, 3, true)]
    #[case(10_001, 1, true)]
    #[case(10_000, 3, false)]
    #[case(5_000, 3, false)]
    #[case(60_000, 0, false)]
    #[case(60_000, 15, false)]
    fn test_request_validation(
        #[case] budget_lkr: u64,
        #[case] duration_days: u32,
        #[case] valid: bool,
    ) {
        assert_eq!(request(budget_lkr, duration_days).is_valid(), valid);
    }

    #[test]
    fn test_blank_cities_are_invalid() {
        let mut req = request(60_000, 3);
        req.start_city = "   ".to_string();
        assert!(!req.is_valid());
    }

    #[test]
    fn test_leg_serialization_shapes() {
        let driving = RouteLeg::driving("Colombo", "Kandy", 115.4, 185);
        let json = serde_json::to_value(&driving).unwrap();
        assert_eq!(json["from"], "Colombo");
        assert_eq!(json["distance_km"], 115.4);
        assert_eq!(json["duration_min"], 185);
        assert!(json.get("error").is_none());

        let failed = RouteLeg::failed("Kandy", "Galle", "Route not found");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], "Route not found");
        assert!(json.get("distance_km").is_none());
    }

    #[test]
    fn test_report_default_is_empty_leg_list() {
        let report = RouteReport::default();
        assert!(report.is_empty());
        assert_eq!(report.legs().len(), 0);
    }
}
