//! SkyCast Analytics — historical temperature comparison for two cities.
//!
//! Geocodes two free-text city names via the Open-Meteo geocoding API,
//! fetches each city's historical daily maximum temperatures from the
//! Open-Meteo archive API, and renders the comparison as summary metrics,
//! a line chart, and a pivoted date × city table.

pub mod compare;
pub mod geocode;
pub mod memo;
pub mod render;
pub mod server;
pub mod weather;

pub use compare::{run_comparison, CityReport, Comparison, CompareError, PivotTable};
pub use geocode::{GeoLocation, GeocodeError, Geocoder};
pub use weather::{DailyReading, DailySeries, WeatherClient, WeatherError};
