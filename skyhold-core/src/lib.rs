pub mod seat;
pub mod flight;
pub mod payment;
pub mod booking;

pub use seat::{Seat, SeatStatus};
pub use flight::{Flight, SeatAvailability};
pub use payment::PaymentMethod;
pub use booking::{BookingOutcome, BookingRequest};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Duplicate seat number: {0}")]
    DuplicateSeat(String),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
