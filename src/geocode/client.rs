//! Open-Meteo geocoding client.
//!
//! One GET per lookup, first match wins. Results are memoized for an
//! hour so repeated lookups of the same city within a session stay
//! off the network.

use super::types::{GeoLocation, GeocodeError};
use crate::memo::TtlMemo;
use serde::Deserialize;
use std::time::Duration;

/// Open-Meteo geocoding search endpoint.
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

const USER_AGENT: &str = "SkyCast/0.1 (temperature-comparison-dashboard)";
const TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Deserialize)]
struct SearchResult {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    country: Option<String>,
}

/// The geocoder: endpoint, HTTP agent, and the session memo.
pub struct Geocoder {
    agent: ureq::Agent,
    base_url: String,
    memo: TtlMemo<GeoLocation>,
    offline: bool,
}

impl Geocoder {
    pub fn new() -> Self {
        Self::with_base_url(GEOCODING_URL)
    }

    /// Point the geocoder at a different endpoint (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build();
        Self {
            agent,
            base_url: base_url.into(),
            memo: TtlMemo::default(),
            offline: false,
        }
    }

    /// Offline mode — memo hits only, no network.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Seed the memo directly (offline sessions and tests).
    pub fn memoize(&mut self, query: &str, loc: GeoLocation) {
        self.memo.put(&query.trim().to_lowercase(), loc);
    }

    /// Resolve a city name to coordinates. Checks the memo first, then
    /// issues a single GET requesting at most one match.
    pub fn resolve(&mut self, query: &str) -> Result<GeoLocation, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let key = query.to_lowercase();
        if let Some(loc) = self.memo.get(&key) {
            return Ok(loc);
        }

        if self.offline {
            return Err(GeocodeError::NotFound(query.to_string()));
        }

        let url = format!(
            "{}?name={}&count=1&language=en&format=json",
            self.base_url,
            urlencode(query),
        );

        let body = match self.agent.get(&url).set("User-Agent", USER_AGENT).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?,
            Err(ureq::Error::Status(code, _)) => return Err(GeocodeError::BadStatus(code)),
            Err(e) => return Err(GeocodeError::Network(e.to_string())),
        };

        let loc = parse_search_body(query, &body)?;
        self.memo.put(&key, loc.clone());
        Ok(loc)
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a geocoding response body. The first result wins; an empty or
/// missing `results` array is a NotFound, not a fault.
pub fn parse_search_body(query: &str, body: &str) -> Result<GeoLocation, GeocodeError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let first = match parsed.results.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.remove(0))
        }
    }) {
        Some(r) => r,
        None => return Err(GeocodeError::NotFound(query.to_string())),
    };

    if !first.latitude.is_finite() || !first.longitude.is_finite() {
        return Err(GeocodeError::InvalidResponse("non-finite coordinates".into()));
    }
    if first.name.is_empty() {
        return Err(GeocodeError::InvalidResponse("empty result name".into()));
    }

    Ok(GeoLocation {
        name: first.name,
        latitude: first.latitude,
        longitude: first.longitude,
        country: first.country.filter(|c| !c.is_empty()),
    })
}

/// Percent-encode a query string component.
fn urlencode(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => c
                .to_string()
                .bytes()
                .map(|b| format!("%{:02X}", b))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYC_BODY: &str = r#"{
        "results": [
            {
                "id": 5128581,
                "name": "New York",
                "latitude": 40.71427,
                "longitude": -74.00597,
                "country_code": "US",
                "timezone": "America/New_York",
                "country": "United States"
            }
        ],
        "generationtime_ms": 0.6
    }"#;

    #[test]
    fn test_parse_first_result() {
        let loc = parse_search_body("new york", NYC_BODY).unwrap();
        assert_eq!(loc.name, "New York");
        assert!((loc.latitude - 40.71427).abs() < 1e-6);
        assert!((loc.longitude + 74.00597).abs() < 1e-6);
        assert_eq!(loc.country.as_deref(), Some("United States"));
        assert!(loc.latitude.is_finite() && loc.longitude.is_finite());
    }

    #[test]
    fn test_parse_empty_results() {
        let body = r#"{"results": [], "generationtime_ms": 0.2}"#;
        match parse_search_body("xyzzy", body) {
            Err(GeocodeError::NotFound(q)) => assert_eq!(q, "xyzzy"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_results_key() {
        // Open-Meteo omits "results" entirely for zero matches.
        let body = r#"{"generationtime_ms": 0.2}"#;
        assert!(matches!(
            parse_search_body("nowhere", body),
            Err(GeocodeError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_garbage_body() {
        assert!(matches!(
            parse_search_body("london", "<html>502</html>"),
            Err(GeocodeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_takes_first_of_many() {
        let body = r#"{"results": [
            {"name": "London", "latitude": 51.50853, "longitude": -0.12574, "country": "United Kingdom"},
            {"name": "London", "latitude": 42.98339, "longitude": -81.23304, "country": "Canada"}
        ]}"#;
        let loc = parse_search_body("london", body).unwrap();
        assert_eq!(loc.country.as_deref(), Some("United Kingdom"));
        assert!((loc.latitude - 51.50853).abs() < 1e-6);
    }

    #[test]
    fn test_parse_country_optional() {
        let body = r#"{"results": [{"name": "Somewhere", "latitude": 1.0, "longitude": 2.0}]}"#;
        let loc = parse_search_body("somewhere", body).unwrap();
        assert!(loc.country.is_none());
    }

    #[test]
    fn test_resolve_empty_query() {
        let mut geo = Geocoder::new();
        assert!(matches!(geo.resolve("   "), Err(GeocodeError::EmptyQuery)));
    }

    #[test]
    fn test_resolve_offline_is_not_found() {
        let mut geo = Geocoder::new();
        geo.set_offline(true);
        match geo.resolve("Stockholm") {
            Err(GeocodeError::NotFound(q)) => assert_eq!(q, "Stockholm"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_memo_hit_skips_network() {
        // Offline + seeded memo: the lookup must succeed without any call.
        let mut geo = Geocoder::new();
        geo.set_offline(true);
        geo.memoize(
            "New York",
            GeoLocation {
                name: "New York".into(),
                latitude: 40.7128,
                longitude: -74.006,
                country: Some("United States".into()),
            },
        );
        let loc = geo.resolve("  NEW YORK ").unwrap();
        assert_eq!(loc.name, "New York");
    }

    #[test]
    fn test_urlencode() {
        assert_eq!(urlencode("New York"), "New%20York");
        assert_eq!(urlencode("kuala-lumpur"), "kuala-lumpur");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("Tromsø"), "Troms%C3%B8");
    }
}
