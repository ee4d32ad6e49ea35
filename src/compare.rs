//! The comparison pipeline — SkyCast's primary public API.
//!
//! Resolves two cities, fetches both daily series, computes summary
//! means, and reshapes the pair into a long-format table and a pivoted
//! date × city table. All-or-nothing: any stage failure aborts the
//! whole comparison, and geocoding failures stop the flow before a
//! single weather call goes out.

use crate::geocode::{GeocodeError, Geocoder};
use crate::weather::{DailySeries, WeatherClient, WeatherError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// One city's share of the comparison output.
#[derive(Debug, Clone, Serialize)]
pub struct CityReport {
    /// "City, Country" label used in the chart legend and table header.
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Mean of the daily maxima over the returned series.
    pub mean_max_temp: f64,
    /// Number of days with data.
    pub days: usize,
    pub series: DailySeries,
}

/// One long-format observation: (date, city label, value).
#[derive(Debug, Clone, Serialize)]
pub struct LongRow {
    pub date: NaiveDate,
    pub city: String,
    pub max_temp: f64,
}

/// Wide-format table: one row per date, one column per city label.
#[derive(Debug, Clone, Serialize)]
pub struct PivotTable {
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PivotRow {
    pub date: NaiveDate,
    /// One value per column; None where a city has no reading that day.
    pub values: Vec<Option<f64>>,
}

impl PivotTable {
    /// Pivot long-format rows into one row per date and one column per
    /// distinct city label, dates ascending. Missing (date, city)
    /// combinations stay None. At most one value per pair is assumed;
    /// a later duplicate would overwrite, matching the upstream
    /// contract of one unique series per city.
    pub fn from_long(rows: &[LongRow]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            if !columns.contains(&row.city) {
                columns.push(row.city.clone());
            }
        }

        let dates: BTreeSet<NaiveDate> = rows.iter().map(|r| r.date).collect();

        let mut table_rows: Vec<PivotRow> = dates
            .into_iter()
            .map(|date| PivotRow {
                date,
                values: vec![None; columns.len()],
            })
            .collect();

        for row in rows {
            let col = columns.iter().position(|c| c == &row.city).unwrap_or(0);
            if let Ok(idx) = table_rows.binary_search_by_key(&row.date, |r| r.date) {
                table_rows[idx].values[col] = Some(row.max_temp);
            }
        }

        Self {
            columns,
            rows: table_rows,
        }
    }
}

/// Full comparison output: date range, per-city reports, and the
/// pivoted table. Serialized as-is on stdout and over the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cities: Vec<CityReport>,
    pub table: PivotTable,
}

impl Comparison {
    /// The concatenated long-format view of both series.
    pub fn long_rows(&self) -> Vec<LongRow> {
        let mut rows = Vec::new();
        for city in &self.cities {
            for reading in &city.series.readings {
                rows.push(LongRow {
                    date: reading.date,
                    city: city.label.clone(),
                    max_temp: reading.max_temp,
                });
            }
        }
        rows
    }
}

/// Comparison failures, tagged with the stage and city that failed so
/// the surfaces can show a precise message.
#[derive(Debug)]
pub enum CompareError {
    /// start > end. Rejected up front, before any network call.
    BadDateRange { start: NaiveDate, end: NaiveDate },
    Geocode { city: String, source: GeocodeError },
    Weather { city: String, source: WeatherError },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDateRange { start, end } => {
                write!(f, "Invalid date range: start {} is after end {}", start, end)
            }
            Self::Geocode { city, source } => {
                write!(f, "Could not resolve '{}': {}", city, source)
            }
            Self::Weather { city, source } => {
                write!(f, "Could not fetch weather for '{}': {}", city, source)
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadDateRange { .. } => None,
            Self::Geocode { source, .. } => Some(source),
            Self::Weather { source, .. } => Some(source),
        }
    }
}

/// Run the full pipeline for two cities over [start, end] inclusive.
///
/// Order matters: both geocode lookups complete before the first
/// weather fetch, so a bad city name never costs an archive call.
pub fn run_comparison(
    geocoder: &mut Geocoder,
    weather: &mut WeatherClient,
    city_a: &str,
    city_b: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Comparison, CompareError> {
    if start > end {
        return Err(CompareError::BadDateRange { start, end });
    }

    let loc_a = geocoder.resolve(city_a).map_err(|source| CompareError::Geocode {
        city: city_a.to_string(),
        source,
    })?;
    let loc_b = geocoder.resolve(city_b).map_err(|source| CompareError::Geocode {
        city: city_b.to_string(),
        source,
    })?;

    let series_a = weather
        .fetch(loc_a.latitude, loc_a.longitude, start, end)
        .map_err(|source| CompareError::Weather {
            city: city_a.to_string(),
            source,
        })?;
    let series_b = weather
        .fetch(loc_b.latitude, loc_b.longitude, start, end)
        .map_err(|source| CompareError::Weather {
            city: city_b.to_string(),
            source,
        })?;

    let cities = vec![
        CityReport {
            label: loc_a.label(),
            latitude: loc_a.latitude,
            longitude: loc_a.longitude,
            mean_max_temp: series_a.mean().unwrap_or(f64::NAN),
            days: series_a.len(),
            series: series_a,
        },
        CityReport {
            label: loc_b.label(),
            latitude: loc_b.latitude,
            longitude: loc_b.longitude,
            mean_max_temp: series_b.mean().unwrap_or(f64::NAN),
            days: series_b.len(),
            series: series_b,
        },
    ];

    let mut comparison = Comparison {
        start,
        end,
        cities,
        table: PivotTable {
            columns: vec![],
            rows: vec![],
        },
    };
    comparison.table = PivotTable::from_long(&comparison.long_rows());

    Ok(comparison)
}
