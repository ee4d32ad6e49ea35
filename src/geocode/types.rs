//! Core types for the geocoding subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geocoded city: coordinates plus the canonical name the provider
/// returned. Produced once per lookup and discarded with the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Country name as reported by the provider, when present.
    #[serde(default)]
    pub country: Option<String>,
}

impl GeoLocation {
    /// Human-readable "City, Country" label used to tag a series.
    pub fn label(&self) -> String {
        match &self.country {
            Some(c) if !c.is_empty() => format!("{}, {}", self.name, c),
            _ => self.name.clone(),
        }
    }
}

/// Geocoding errors. Every failure mode collapses to one of these;
/// callers decide what the user sees.
#[derive(Debug)]
pub enum GeocodeError {
    /// Transport-level failure (DNS, connect, timeout).
    Network(String),
    /// Non-success HTTP status from the provider.
    BadStatus(u16),
    /// Body did not parse or lacked expected fields.
    InvalidResponse(String),
    /// The provider returned zero matches for the query.
    NotFound(String),
    /// The query was empty after trimming.
    EmptyQuery,
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Geocoding network error: {}", msg),
            Self::BadStatus(code) => write!(f, "Geocoding API returned HTTP {}", code),
            Self::InvalidResponse(msg) => write!(f, "Invalid geocoding response: {}", msg),
            Self::NotFound(q) => write!(f, "City not found: '{}'", q),
            Self::EmptyQuery => write!(f, "City name is empty"),
        }
    }
}

impl std::error::Error for GeocodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_with_country() {
        let loc = GeoLocation {
            name: "New York".into(),
            latitude: 40.7128,
            longitude: -74.006,
            country: Some("United States".into()),
        };
        assert_eq!(loc.label(), "New York, United States");
    }

    #[test]
    fn test_label_without_country() {
        let loc = GeoLocation {
            name: "London".into(),
            latitude: 51.5074,
            longitude: -0.1278,
            country: None,
        };
        assert_eq!(loc.label(), "London");
    }

    #[test]
    fn test_label_empty_country() {
        let loc = GeoLocation {
            name: "Atlantis".into(),
            latitude: 0.0,
            longitude: 0.0,
            country: Some(String::new()),
        };
        assert_eq!(loc.label(), "Atlantis");
    }

    #[test]
    fn test_not_found_display() {
        let err = GeocodeError::NotFound("xyzzy".into());
        assert_eq!(err.to_string(), "City not found: 'xyzzy'");
    }
}
