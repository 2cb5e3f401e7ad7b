use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Held,
    Booked,
}

/// A single unit of inventory. Every status change happens under the seat's
/// own lock; nothing above the seat ever locks more than one seat at a time.
#[derive(Debug)]
pub struct Seat {
    number: String,
    status: Mutex<SeatStatus>,
}

impl Seat {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            status: Mutex::new(SeatStatus::Available),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn status(&self) -> SeatStatus {
        *self.lock()
    }

    /// Transition: Available → Held
    pub fn hold(&self) -> bool {
        self.transition(SeatStatus::Available, SeatStatus::Held)
    }

    /// Transition: Held → Booked
    pub fn confirm(&self) -> bool {
        self.transition(SeatStatus::Held, SeatStatus::Booked)
    }

    /// Transition: Held → Available. Any other status is left alone.
    pub fn release(&self) -> bool {
        self.transition(SeatStatus::Held, SeatStatus::Available)
    }

    fn transition(&self, from: SeatStatus, to: SeatStatus) -> bool {
        let mut status = self.lock();
        if *status != from {
            return false;
        }
        *status = to;
        true
    }

    // The guarded value is a plain enum that is never left half-written,
    // so a poisoned lock still holds a valid status.
    fn lock(&self) -> MutexGuard<'_, SeatStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_seat_lifecycle() {
        let seat = Seat::new("A1");
        assert_eq!(seat.number(), "A1");
        assert_eq!(seat.status(), SeatStatus::Available);

        // Available → Held
        assert!(seat.hold());
        assert_eq!(seat.status(), SeatStatus::Held);

        // Held → Booked
        assert!(seat.confirm());
        assert_eq!(seat.status(), SeatStatus::Booked);

        // Booked is terminal
        assert!(!seat.release());
        assert!(!seat.hold());
        assert!(!seat.confirm());
        assert_eq!(seat.status(), SeatStatus::Booked);
    }

    #[test]
    fn test_invalid_transition() {
        let seat = Seat::new("A2");

        // Cannot go directly from Available to Booked
        assert!(!seat.confirm());
        assert_eq!(seat.status(), SeatStatus::Available);

        // Releasing an Available seat is a no-op
        assert!(!seat.release());
        assert_eq!(seat.status(), SeatStatus::Available);

        // Held → Available → Held again
        assert!(seat.hold());
        assert!(!seat.hold());
        assert!(seat.release());
        assert!(seat.hold());
    }

    #[test]
    fn test_concurrent_hold_single_winner() {
        let seat = Arc::new(Seat::new("A3"));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let seat = Arc::clone(&seat);
                thread::spawn(move || seat.hold())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|held| *held)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(seat.status(), SeatStatus::Held);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SeatStatus::Held).unwrap();
        assert_eq!(json, "\"HELD\"");
    }
}
