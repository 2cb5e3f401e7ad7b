use axum::{
    routing::get,
    Router,
    http::Method,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod error;
pub mod flights;
pub mod producer;
pub mod reports;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // Read-only surface, so GET is all the dashboard needs
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/metrics", get(reports::get_metrics))
        .route("/metrics/prometheus", get(reports::get_prometheus_metrics))
        .route("/dashboard", get(reports::get_dashboard))
        .route("/v1/flight", get(flights::get_flight))
        .route("/v1/flight/seats/{seat_number}", get(flights::get_seat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
