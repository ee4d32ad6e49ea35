//! Archive weather client.
//!
//! Fetches a city's historical daily maximum temperatures from the
//! Open-Meteo archive API. One GET per (coordinates, date range); the
//! full range comes back in a single response as parallel `time` and
//! `temperature_2m_max` arrays.

use crate::memo::TtlMemo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Open-Meteo archive endpoint.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const USER_AGENT: &str = "SkyCast/0.1 (temperature-comparison-dashboard)";
const TIMEOUT_SECS: u64 = 10;

/// One observed day: calendar date and the daily maximum temperature (°C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub max_temp: f64,
}

/// A chronologically ordered daily series for one city.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries {
    pub readings: Vec<DailyReading>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Mean of the max temperatures, or None for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.readings.is_empty() {
            return None;
        }
        let sum: f64 = self.readings.iter().map(|r| r.max_temp).sum();
        Some(sum / self.readings.len() as f64)
    }
}

/// Weather fetch errors, mirroring the geocoding taxonomy.
#[derive(Debug)]
pub enum WeatherError {
    Network(String),
    BadStatus(u16),
    InvalidResponse(String),
    /// The response had no usable daily data for the range.
    NoData,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Weather network error: {}", msg),
            Self::BadStatus(code) => write!(f, "Weather API returned HTTP {}", code),
            Self::InvalidResponse(msg) => write!(f, "Invalid weather response: {}", msg),
            Self::NoData => write!(f, "No weather data for the requested range"),
        }
    }
}

impl std::error::Error for WeatherError {}

#[derive(Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
}

/// The archive weather client with its session memo.
pub struct WeatherClient {
    agent: ureq::Agent,
    base_url: String,
    memo: TtlMemo<DailySeries>,
    offline: bool,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(ARCHIVE_URL)
    }

    /// Point the client at a different endpoint (for testing).
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
    pub fn memoize(
        &mut self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
        series: DailySeries,
    ) {
        let key = Self::memo_key(latitude, longitude, start, end);
        self.memo.put(&key, series);
    }

    fn memo_key(latitude: f64, longitude: f64, start: NaiveDate, end: NaiveDate) -> String {
        format!("{:.4},{:.4},{},{}", latitude, longitude, start, end)
    }

    /// Fetch the daily max-temperature series for one coordinate pair
    /// over [start, end] inclusive.
    pub fn fetch(
        &mut self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries, WeatherError> {
        let key = Self::memo_key(latitude, longitude, start, end);
        if let Some(series) = self.memo.get(&key) {
            return Ok(series);
        }

        if self.offline {
            return Err(WeatherError::NoData);
        }

        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_max&timezone=auto",
            self.base_url,
            latitude,
            longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );

        let body = match self.agent.get(&url).set("User-Agent", USER_AGENT).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?,
            Err(ureq::Error::Status(code, _)) => return Err(WeatherError::BadStatus(code)),
            Err(e) => return Err(WeatherError::Network(e.to_string())),
        };

        let series = parse_archive_body(&body)?;
        self.memo.put(&key, series.clone());
        Ok(series)
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an archive response body into a series, preserving the input
/// order of the parallel arrays. Null temperatures (archive gaps) are
/// skipped; an all-null or empty range is NoData.
pub fn parse_archive_body(body: &str) -> Result<DailySeries, WeatherError> {
    let parsed: ArchiveResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

    let daily = parsed.daily.ok_or(WeatherError::NoData)?;

    if daily.time.len() != daily.temperature_2m_max.len() {
        return Err(WeatherError::InvalidResponse(format!(
            "parallel array length mismatch: {} dates vs {} temperatures",
            daily.time.len(),
            daily.temperature_2m_max.len(),
        )));
    }

    let mut readings = Vec::with_capacity(daily.time.len());
    for (raw_date, temp) in daily.time.iter().zip(daily.temperature_2m_max.iter()) {
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|e| WeatherError::InvalidResponse(format!("bad date '{}': {}", raw_date, e)))?;
        if let Some(t) = temp {
            readings.push(DailyReading {
                date,
                max_temp: *t,
            });
        }
    }

    if readings.is_empty() {
        return Err(WeatherError::NoData);
    }

    Ok(DailySeries { readings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const THREE_DAY_BODY: &str = r#"{
        "latitude": 40.710335,
        "longitude": -73.99307,
        "timezone": "America/New_York",
        "daily_units": {"time": "iso8601", "temperature_2m_max": "°C"},
        "daily": {
            "time": ["2026-07-01", "2026-07-02", "2026-07-03"],
            "temperature_2m_max": [20.0, 21.5, 19.0]
        }
    }"#;

    #[test]
    fn test_parse_three_days_ordered() {
        let series = parse_archive_body(THREE_DAY_BODY).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.readings[0].date,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
        assert_eq!(
            series.readings[2].date,
            NaiveDate::from_ymd_opt(2026, 7, 3).unwrap()
        );
        let temps: Vec<f64> = series.readings.iter().map(|r| r.max_temp).collect();
        assert_eq!(temps, vec![20.0, 21.5, 19.0]);
    }

    #[test]
    fn test_mean() {
        let series = parse_archive_body(THREE_DAY_BODY).unwrap();
        assert_relative_eq!(series.mean().unwrap(), 20.1667, epsilon = 5e-3);
    }

    #[test]
    fn test_mean_empty() {
        assert!(DailySeries::default().mean().is_none());
    }

    #[test]
    fn test_parse_missing_daily() {
        let body = r#"{"latitude": 1.0, "longitude": 2.0}"#;
        assert!(matches!(parse_archive_body(body), Err(WeatherError::NoData)));
    }

    #[test]
    fn test_parse_length_mismatch() {
        let body = r#"{"daily": {
            "time": ["2026-07-01", "2026-07-02"],
            "temperature_2m_max": [20.0]
        }}"#;
        assert!(matches!(
            parse_archive_body(body),
            Err(WeatherError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_null_gaps_skipped() {
        let body = r#"{"daily": {
            "time": ["2026-07-01", "2026-07-02", "2026-07-03"],
            "temperature_2m_max": [20.0, null, 19.0]
        }}"#;
        let series = parse_archive_body(body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.readings[1].max_temp, 19.0);
    }

    #[test]
    fn test_parse_all_null_is_no_data() {
        let body = r#"{"daily": {
            "time": ["2026-07-01"],
            "temperature_2m_max": [null]
        }}"#;
        assert!(matches!(parse_archive_body(body), Err(WeatherError::NoData)));
    }

    #[test]
    fn test_parse_bad_date() {
        let body = r#"{"daily": {
            "time": ["July 1st"],
            "temperature_2m_max": [20.0]
        }}"#;
        assert!(matches!(
            parse_archive_body(body),
            Err(WeatherError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_fetch_memo_hit_skips_network() {
        let mut client = WeatherClient::new();
        client.set_offline(true);
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 7, 3).unwrap();
        let series = parse_archive_body(THREE_DAY_BODY).unwrap();
        client.memoize(40.7128, -74.006, start, end, series);

        let got = client.fetch(40.7128, -74.006, start, end).unwrap();
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_fetch_offline_is_no_data() {
        let mut client = WeatherClient::new();
        client.set_offline(true);
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 7, 3).unwrap();
        assert!(matches!(
            client.fetch(40.7, -74.0, start, end),
            Err(WeatherError::NoData)
        ));
    }
}
