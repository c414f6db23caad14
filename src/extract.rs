//! Destination mining from generated itinerary text
//!
//! Best-effort pattern matching, not a strict parser: day headers that fail
//! to match are skipped silently, and an itinerary without any recognizable
//! header yields an empty list.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::gazetteer::Gazetteer;

// The captured label is bounded to letters and spaces so a header can never
// bleed into the next line's `Day N:` heading.
static DAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)day\s*\d+\s*:\s*([a-z ]+)(?:,|\s|\n|$)").expect("day header pattern")
});

/// Strategy for locating destination mentions in itinerary text
///
/// Kept behind a trait so the orchestrator does not care how cities are
/// found; a stricter grammar could replace the regex miner without touching
/// the rest of the pipeline.
pub trait DestinationMiner: Send + Sync {
    /// Ordered, duplicate-free city names, excluding the start and end city
    /// (case-insensitive). Resolvable labels come back as their canonical
    /// gazetteer names, unresolvable ones as the raw trimmed label.
    fn extract(&self, itinerary: &str, start: &str, end: &str) -> Vec<String>;
}

/// Mines `Day N: City` headers and resolves them against the gazetteer
pub struct DayHeaderMiner {
    gazetteer: Arc<Gazetteer>,
}

impl DayHeaderMiner {
    #[must_use]
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }
}

impl DestinationMiner for DayHeaderMiner {
    fn extract(&self, itinerary: &str, start: &str, end: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(start.trim().to_lowercase());
        seen.insert(end.trim().to_lowercase());

        let mut destinations = Vec::new();
        for caps in DAY_HEADER.captures_iter(itinerary) {
            let label = caps[1].trim();
            if label.is_empty() {
                continue;
            }
            let label_key = label.to_lowercase();
            if seen.contains(&label_key) {
                continue;
            }

            let city = self
                .gazetteer
                .resolve(label)
                .unwrap_or(label)
                .to_string();
            let city_key = city.to_lowercase();
            if seen.contains(&city_key) {
                // Resolution landed on a city already accounted for; record
                // the raw wording so it is not reprocessed either.
                seen.insert(label_key);
                continue;
            }

            seen.insert(label_key);
            seen.insert(city_key);
            destinations.push(city);
        }
        destinations
    }
}
