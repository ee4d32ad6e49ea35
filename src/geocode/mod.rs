//! Geocoding subsystem for SkyCast.
//!
//! Resolves a free-text city name to coordinates plus a display name via
//! the Open-Meteo geocoding API, with a one-hour in-memory memo.

pub mod client;
pub mod types;

pub use client::{Geocoder, GEOCODING_URL};
pub use types::{GeoLocation, GeocodeError};
