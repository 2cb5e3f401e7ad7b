use crate::seat::{Seat, SeatStatus};
use crate::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::HashMap;

/// Seat counts by status, read seat by seat.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SeatAvailability {
    pub available: usize,
    pub held: usize,
    pub booked: usize,
}

/// Seat registry for one flight.
///
/// The seat map is fixed at construction, so lookups need no lock. Hold,
/// confirm and release contend only on the addressed seat.
#[derive(Debug)]
pub struct Flight {
    pub id: String,
    pub name: String,
    pub price: f64,
    seats: HashMap<String, Seat>,
}

impl Flight {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        seat_numbers: I,
    ) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seats = HashMap::new();
        for number in seat_numbers {
            let number = number.into();
            if seats.contains_key(&number) {
                return Err(CoreError::DuplicateSeat(number));
            }
            seats.insert(number.clone(), Seat::new(number));
        }

        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::ValidationError(format!("invalid price {}", price)));
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            price,
            seats,
        })
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    /// Returns false for unknown seats and seats that are not Available.
    pub fn hold_seat(&self, seat_number: &str) -> bool {
        self.seats
            .get(seat_number)
            .map(Seat::hold)
            .unwrap_or(false)
    }

    /// Returns false for unknown seats and seats that are not Held.
    pub fn confirm_seat(&self, seat_number: &str) -> bool {
        self.seats
            .get(seat_number)
            .map(Seat::confirm)
            .unwrap_or(false)
    }

    /// Reverts a Held seat to Available; silent for anything else.
    pub fn release_seat(&self, seat_number: &str) {
        if let Some(seat) = self.seats.get(seat_number) {
            seat.release();
        }
    }

    pub fn seat_status(&self, seat_number: &str) -> Option<SeatStatus> {
        self.seats.get(seat_number).map(Seat::status)
    }

    pub fn seat_numbers(&self) -> impl Iterator<Item = &str> {
        self.seats.keys().map(String::as_str)
    }

    /// Not a consistent cut across seats while bookings are in flight.
    pub fn availability(&self) -> SeatAvailability {
        self.seats
            .values()
            .fold(SeatAvailability::default(), |mut acc, seat| {
                match seat.status() {
                    SeatStatus::Available => acc.available += 1,
                    SeatStatus::Held => acc.held += 1,
                    SeatStatus::Booked => acc.booked += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn flight(seats: usize) -> Flight {
        Flight::new("T100", "Test Air", 1000.0, (1..=seats).map(|i| format!("A{}", i))).unwrap()
    }

    #[test]
    fn test_hold_confirm_release() {
        let flight = flight(3);

        assert!(flight.hold_seat("A1"));
        assert!(flight.confirm_seat("A1"));
        assert_eq!(flight.seat_status("A1"), Some(SeatStatus::Booked));

        assert!(flight.hold_seat("A2"));
        flight.release_seat("A2");
        assert_eq!(flight.seat_status("A2"), Some(SeatStatus::Available));

        // Release never reverts a booked seat
        flight.release_seat("A1");
        assert_eq!(flight.seat_status("A1"), Some(SeatStatus::Booked));

        let availability = flight.availability();
        assert_eq!(availability, SeatAvailability { available: 2, held: 0, booked: 1 });
    }

    #[test]
    fn test_unknown_seat() {
        let flight = flight(2);

        assert!(!flight.hold_seat("Z9"));
        assert!(!flight.confirm_seat("Z9"));
        flight.release_seat("Z9");
        assert_eq!(flight.seat_status("Z9"), None);
        assert_eq!(flight.availability().available, 2);
    }

    #[test]
    fn test_duplicate_seat_rejected() {
        let result = Flight::new("T100", "Test Air", 1000.0, vec!["A1", "A2", "A1"]);
        assert!(matches!(result, Err(CoreError::DuplicateSeat(ref s)) if s == "A1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Flight::new("T100", "Test Air", -1.0, vec!["A1"]);
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_concurrent_mixed_operations_stay_legal() {
        let flight = Arc::new(flight(10));

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let flight = Arc::clone(&flight);
                thread::spawn(move || {
                    let seat = format!("A{}", i % 10 + 1);
                    let mut confirmed = 0;
                    for round in 0..50 {
                        if flight.hold_seat(&seat) {
                            if (i + round) % 3 == 0 {
                                if flight.confirm_seat(&seat) {
                                    confirmed += 1;
                                }
                            } else {
                                flight.release_seat(&seat);
                            }
                        }
                    }
                    (seat, confirmed)
                })
            })
            .collect();

        let mut confirms: HashMap<String, usize> = HashMap::new();
        for handle in handles {
            let (seat, confirmed) = handle.join().unwrap();
            *confirms.entry(seat).or_default() += confirmed;
        }

        // A seat is confirmed at most once and only booked seats were confirmed
        for number in flight.seat_numbers() {
            let count = confirms.get(number).copied().unwrap_or(0);
            assert!(count <= 1, "seat {} confirmed {} times", number, count);
            let booked = flight.seat_status(number) == Some(SeatStatus::Booked);
            assert_eq!(booked, count == 1);
            assert_ne!(flight.seat_status(number), Some(SeatStatus::Held));
        }
    }
}
