use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use prometheus::{
    Encoder, Gauge, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub total_requests: u64,
    pub success: u64,
    pub failed: u64,
    pub timeout: u64,
    pub avg_latency: String,
    pub avg_latency_ms: f64,
}

/// GET /metrics
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let snapshot = state.metrics.snapshot();

    Json(MetricsResponse {
        total_requests: snapshot.total_requests,
        success: snapshot.success,
        failed: snapshot.failed,
        timeout: snapshot.timeout,
        avg_latency: format!("{:?}", snapshot.average_latency),
        avg_latency_ms: snapshot.average_latency.as_secs_f64() * 1000.0,
    })
}

/// GET /dashboard
/// Self-refreshing HTML view of the same counters
pub async fn get_dashboard(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.metrics.snapshot();
    let seats = state.flight.availability();

    Html(format!(
        r#"<html>
<head>
<title>Booking Metrics Dashboard</title>
<meta http-equiv="refresh" content="2">
</head>
<body>
<h1>Flight Booking Metrics</h1>
<h2>{name} ({id})</h2>
<p>Total Requests: {total}</p>
<p>Success: {success}</p>
<p>Failed (seat held by another user / payment declined): {failed}</p>
<p>Failed due to payment timeout: {timeout}</p>
<p>Average Latency: {latency:?}</p>
<h2>Seats</h2>
<p>Available: {available} / Held: {held} / Booked: {booked}</p>
</body>
</html>"#,
        name = state.flight.name,
        id = state.flight.id,
        total = snapshot.total_requests,
        success = snapshot.success,
        failed = snapshot.failed,
        timeout = snapshot.timeout,
        latency = snapshot.average_latency,
        available = seats.available,
        held = seats.held,
        booked = seats.booked,
    ))
}

/// GET /metrics/prometheus
/// Text exposition rebuilt from a fresh snapshot on every scrape
pub async fn get_prometheus_metrics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.metrics.snapshot();
    let seats = state.flight.availability();
    let registry = Registry::new();

    let total = IntCounter::new("skyhold_booking_requests_total", "Booking requests processed")?;
    total.inc_by(snapshot.total_requests);
    registry.register(Box::new(total))?;

    let outcomes = IntCounterVec::new(
        Opts::new("skyhold_booking_outcomes_total", "Booking requests by outcome"),
        &["outcome"],
    )?;
    outcomes.with_label_values(&["success"]).inc_by(snapshot.success);
    outcomes.with_label_values(&["failed"]).inc_by(snapshot.failed);
    outcomes.with_label_values(&["timeout"]).inc_by(snapshot.timeout);
    registry.register(Box::new(outcomes))?;

    let latency = Gauge::new("skyhold_booking_latency_average_seconds", "Mean booking latency")?;
    latency.set(snapshot.average_latency.as_secs_f64());
    registry.register(Box::new(latency))?;

    let seat_gauge = IntGaugeVec::new(
        Opts::new("skyhold_seats", "Seats by status")
            .const_label("flight", state.flight.id.as_str()),
        &["status"],
    )?;
    seat_gauge.with_label_values(&["available"]).set(seats.available as i64);
    seat_gauge.with_label_values(&["held"]).set(seats.held as i64);
    seat_gauge.with_label_values(&["booked"]).set(seats.booked as i64);
    registry.register(Box::new(seat_gauge))?;

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    let body = String::from_utf8(buffer)?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], body))
}
