use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::compare::{run_comparison, CompareError, Comparison};
use crate::geocode::{GeoLocation, GeocodeError};

use super::state::AppState;
use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn style() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css")],
        static_files::STYLE_CSS,
    )
        .into_response()
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub query: Option<String>,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<GeoLocation>, Response> {
    let start = Instant::now();

    let query = params.query.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'query' parameter").into_response());
    }

    let resolved = {
        let mut geocoder = state.geocoder.lock().unwrap();
        geocoder.resolve(query)
    };

    let resolved = match resolved {
        Ok(loc) => loc,
        Err(e @ GeocodeError::NotFound(_)) => {
            return Err(api_error(StatusCode::NOT_FOUND, format!("{}", e)).into_response());
        }
        Err(e) => {
            return Err(api_error(StatusCode::BAD_GATEWAY, format!("{}", e)).into_response());
        }
    };

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] GET /api/resolve?query={} -> {} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        query,
        resolved.name,
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(resolved))
}

// ─── GET /api/compare ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CompareQuery {
    pub city_a: Option<String>,
    pub city_b: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<Comparison>, Response> {
    let started = Instant::now();

    let city_a = params.city_a.as_deref().unwrap_or("").trim();
    let city_b = params.city_b.as_deref().unwrap_or("").trim();
    if city_a.is_empty() || city_b.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Provide both 'city_a' and 'city_b' parameters",
        )
        .into_response());
    }

    let (start, end) = parse_range(params.start.as_deref(), params.end.as_deref())
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg).into_response())?;

    let result = {
        // Two blocking GETs per city at most; the request is
        // all-or-nothing, so both clients stay locked for its span.
        let mut geocoder = state.geocoder.lock().unwrap();
        let mut weather = state.weather.lock().unwrap();
        run_comparison(&mut geocoder, &mut weather, city_a, city_b, start, end)
    };

    let comparison = match result {
        Ok(c) => c,
        Err(e @ CompareError::BadDateRange { .. }) => {
            return Err(api_error(StatusCode::BAD_REQUEST, format!("{}", e)).into_response());
        }
        Err(e @ CompareError::Geocode { source: GeocodeError::NotFound(_), .. }) => {
            return Err(api_error(StatusCode::NOT_FOUND, format!("{}", e)).into_response());
        }
        Err(e) => {
            return Err(api_error(StatusCode::BAD_GATEWAY, format!("{}", e)).into_response());
        }
    };

    let elapsed = started.elapsed();
    eprintln!(
        "[{}] GET /api/compare city_a={} city_b={} {}..{} -> {} rows ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        city_a,
        city_b,
        start,
        end,
        comparison.table.rows.len(),
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(comparison))
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Parse start/end query params. Defaults: the last 30 days ending
/// today, matching the dashboard's initial view.
fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate), String> {
    let today = Utc::now().naive_utc().date();

    let end = match end {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| format!("Invalid end date '{}': {}", raw, e))?,
        None => today,
    };
    let start = match start {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| format!("Invalid start date '{}': {}", raw, e))?,
        None => end - chrono::Duration::days(30),
    };

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_explicit() {
        let (start, end) = parse_range(Some("2026-07-01"), Some("2026-07-03")).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 7, 3).unwrap());
    }

    #[test]
    fn test_parse_range_defaults_to_last_30_days() {
        let (start, end) = parse_range(None, None).unwrap();
        assert_eq!(end - start, chrono::Duration::days(30));
    }

    #[test]
    fn test_parse_range_bad_date() {
        assert!(parse_range(Some("tomorrow"), None).is_err());
        assert!(parse_range(None, Some("01/07/2026")).is_err());
    }
}
