use crate::flight::Flight;
use crate::payment::PaymentMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Terminal result of one booking request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingOutcome {
    Success,
    /// Seat unavailable or unknown, or payment declined
    Failed,
    /// Payment did not answer before the deadline
    Timeout,
}

impl BookingOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingOutcome::Success => "success",
            BookingOutcome::Failed => "failed",
            BookingOutcome::Timeout => "timeout",
        }
    }
}

impl fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work for the worker pool. Consumed by exactly one worker.
pub struct BookingRequest {
    pub id: Uuid,
    pub requester_id: String,
    pub seat_number: String,
    pub flight: Arc<Flight>,
    pub payment: Arc<dyn PaymentMethod>,
    pub created_at: DateTime<Utc>,
}

impl BookingRequest {
    pub fn new(
        requester_id: impl Into<String>,
        seat_number: impl Into<String>,
        flight: Arc<Flight>,
        payment: Arc<dyn PaymentMethod>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester_id: requester_id.into(),
            seat_number: seat_number.into(),
            flight,
            payment,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for BookingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingRequest")
            .field("id", &self.id)
            .field("requester_id", &self.requester_id)
            .field("seat_number", &self.seat_number)
            .field("flight_id", &self.flight.id)
            .field("payment", &self.payment.name())
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&BookingOutcome::Timeout).unwrap();
        assert_eq!(json, "\"timeout\"");

        let outcome: BookingOutcome = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(outcome, BookingOutcome::Success);
        assert_eq!(BookingOutcome::Failed.to_string(), "failed");
    }
}
