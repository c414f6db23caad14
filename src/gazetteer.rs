//! City gazetteer: fixed name-to-coordinate lookup with a default fallback
//!
//! Consumers rely on lookups never failing: an unknown city silently maps to
//! the configured default point, the island centre for the stock table.

use crate::models::GeoPoint;

/// Read-only city table, populated once at construction
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<(String, GeoPoint)>,
    default_point: GeoPoint,
}

impl Gazetteer {
    /// Build a gazetteer for an arbitrary region
    #[must_use]
    pub fn new(
        entries: impl IntoIterator<Item = (String, GeoPoint)>,
        default_point: GeoPoint,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            default_point,
        }
    }

    /// The stock Sri Lanka table, defaulting to the island centre
    #[must_use]
    pub fn sri_lanka() -> Self {
        let cities = [
            ("Colombo", 6.9271, 79.8612),
            ("Kandy", 7.2906, 80.6337),
            ("Galle", 6.0535, 80.2210),
            ("Ella", 6.8667, 81.0466),
            ("Mirissa", 5.9483, 80.4589),
            ("Sigiriya", 7.9570, 80.7603),
        ];
        Self::new(
            cities
                .into_iter()
                .map(|(name, lat, lon)| (name.to_string(), GeoPoint::new(lat, lon))),
            GeoPoint::new(7.8731, 80.7718),
        )
    }

    /// Case-insensitive exact lookup; unknown names get the default point
    #[must_use]
    pub fn lookup(&self, name: &str) -> GeoPoint {
        self.entries
            .iter()
            .find(|(city, _)| city.eq_ignore_ascii_case(name))
            .map_or(self.default_point, |(_, point)| *point)
    }

    /// Canonical city name contained in a free-text label, if any
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let label = label.to_lowercase();
        self.entries
            .iter()
            .find(|(city, _)| label.contains(&city.to_lowercase()))
            .map(|(city, _)| city.as_str())
    }

    /// The point returned for unrecognized names
    #[must_use]
    pub fn default_point(&self) -> GeoPoint {
        self.default_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_city() {
        let gazetteer = Gazetteer::sri_lanka();
        let kandy = gazetteer.lookup("Kandy");
        assert_eq!(kandy, GeoPoint::new(7.2906, 80.6337));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let gazetteer = Gazetteer::sri_lanka();
        assert_eq!(gazetteer.lookup("kandy"), gazetteer.lookup("KANDY"));
    }

    #[test]
    fn test_lookup_miss_returns_default_point() {
        let gazetteer = Gazetteer::sri_lanka();
        assert_eq!(gazetteer.lookup("Atlantis"), gazetteer.default_point());
        assert_eq!(gazetteer.lookup(""), gazetteer.default_point());
    }

    #[test]
    fn test_resolve_by_containment() {
        let gazetteer = Gazetteer::sri_lanka();
        assert_eq!(gazetteer.resolve("Kandy city"), Some("Kandy"));
        assert_eq!(gazetteer.resolve("arrival in COLOMBO"), Some("Colombo"));
        assert_eq!(gazetteer.resolve("Nuwara Eliya"), None);
    }

    #[test]
    fn test_custom_region() {
        let gazetteer = Gazetteer::new(
            [("Kathmandu".to_string(), GeoPoint::new(27.7172, 85.3240))],
            GeoPoint::new(28.3949, 84.1240),
        );
        assert_eq!(
            gazetteer.lookup("kathmandu"),
            GeoPoint::new(27.7172, 85.3240)
        );
        assert_eq!(gazetteer.lookup("Pokhara"), GeoPoint::new(28.3949, 84.1240));
    }
}
