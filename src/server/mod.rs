//! Web dashboard: an axum server exposing the comparison as a JSON
//! API plus an embedded single-page frontend.

mod handlers;
mod state;
mod static_files;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::geocode::Geocoder;
use crate::weather::WeatherClient;
use std::sync::Mutex;

pub fn build_router() -> Router {
    let state = Arc::new(AppState {
        geocoder: Mutex::new(Geocoder::new()),
        weather: Mutex::new(WeatherClient::new()),
    });

    Router::new()
        .route("/", get(handlers::index))
        .route("/style.css", get(handlers::style))
        .route("/app.js", get(handlers::script))
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/compare", get(handlers::compare))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16) {
    let app = build_router();
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  SkyCast dashboard listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        });
}
