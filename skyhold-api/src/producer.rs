use rand::Rng;
use skyhold_core::{BookingRequest, Flight, PaymentMethod};
use skyhold_order::{BookingQueue, PoolError};
use std::sync::Arc;

/// Feeds `count` requests for random seats of `flight` into the queue.
///
/// Consumes the queue handle, so the queue closes once the returned future
/// finishes (unless other handles are still alive). Returns how many requests
/// were accepted.
pub async fn run_demo_producer(
    queue: BookingQueue,
    flight: Arc<Flight>,
    payment: Arc<dyn PaymentMethod>,
    count: usize,
) -> usize {
    let capacity = flight.capacity();
    let mut accepted = 0;

    for i in 0..count {
        let seat = format!("A{}", rand::thread_rng().gen_range(1..=capacity.max(1)));
        let requester = format!("User-{}", i);
        let request =
            BookingRequest::new(requester, seat, Arc::clone(&flight), Arc::clone(&payment));

        match queue.submit(request).await {
            Ok(()) => accepted += 1,
            Err(PoolError::QueueClosed) => {
                tracing::warn!("Booking queue closed after {} of {} requests", accepted, count);
                break;
            }
            Err(e) => {
                tracing::error!("Failed to submit booking request: {}", e);
                break;
            }
        }
    }

    tracing::info!("Demo producer submitted {} booking requests", accepted);
    accepted
}
