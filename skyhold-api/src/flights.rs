use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use skyhold_core::{SeatAvailability, SeatStatus};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightSummaryResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub capacity: usize,
    pub seats: SeatCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeatCounts {
    pub available: usize,
    pub held: usize,
    pub booked: usize,
}

impl From<SeatAvailability> for SeatCounts {
    fn from(a: SeatAvailability) -> Self {
        Self {
            available: a.available,
            held: a.held,
            booked: a.booked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeatResponse {
    pub seat_number: String,
    pub status: SeatStatus,
}

/// GET /v1/flight
pub async fn get_flight(State(state): State<AppState>) -> Json<FlightSummaryResponse> {
    let flight = &state.flight;

    Json(FlightSummaryResponse {
        id: flight.id.clone(),
        name: flight.name.clone(),
        price: flight.price,
        capacity: flight.capacity(),
        seats: flight.availability().into(),
    })
}

/// GET /v1/flight/seats/{seat_number}
pub async fn get_seat(
    State(state): State<AppState>,
    Path(seat_number): Path<String>,
) -> Result<Json<SeatResponse>, AppError> {
    let status = state
        .flight
        .seat_status(&seat_number)
        .ok_or_else(|| AppError::SeatNotFound(seat_number.clone()))?;

    Ok(Json(SeatResponse { seat_number, status }))
}
