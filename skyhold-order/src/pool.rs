use skyhold_core::{BookingOutcome, BookingRequest};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::EngineConfig;
use crate::gate::{PaymentGate, PaymentResult};
use crate::metrics::MetricsAggregator;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<BookingRequest>>>;

/// Producer side of the bounded request queue.
///
/// Clones share the same queue; it closes once every clone is dropped.
#[derive(Clone)]
pub struct BookingQueue {
    tx: mpsc::Sender<BookingRequest>,
}

impl BookingQueue {
    /// Enqueue a request, waiting while the queue is full
    pub async fn submit(&self, request: BookingRequest) -> Result<(), PoolError> {
        self.tx.send(request).await.map_err(|_| PoolError::QueueClosed)
    }

    /// Enqueue a request, rejecting it if the queue is full
    pub fn try_submit(&self, request: BookingRequest) -> Result<(), PoolError> {
        self.tx.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => PoolError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => PoolError::QueueClosed,
        })
    }

    /// Free slots left in the queue
    pub fn remaining_capacity(&self) -> usize {
        self.tx.capacity()
    }
}

/// Fixed set of workers draining one bounded queue.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn the workers. Requests go in through the returned queue; drop
    /// every clone of it to let the workers drain and stop.
    pub fn start(
        config: &EngineConfig,
        metrics: Arc<MetricsAggregator>,
    ) -> Result<(BookingQueue, WorkerPool), PoolError> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let rx: SharedReceiver = Arc::new(Mutex::new(rx));
        let gate = PaymentGate::new(config.payment_deadline());

        let handles = (1..=config.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    gate,
                    metrics: Arc::clone(&metrics),
                };
                tokio::spawn(worker.run(Arc::clone(&rx)))
            })
            .collect();

        tracing::info!(
            "Started {} booking workers (queue capacity {}, payment deadline {:?})",
            config.workers,
            config.queue_capacity,
            gate.deadline()
        );

        Ok((BookingQueue { tx }, WorkerPool { handles }))
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Wait until the queue is closed and every worker has drained it
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!("Booking worker terminated abnormally: {}", e);
            }
        }
        tracing::info!("All booking workers stopped");
    }
}

struct Worker {
    id: usize,
    gate: PaymentGate,
    metrics: Arc<MetricsAggregator>,
}

impl Worker {
    async fn run(self, rx: SharedReceiver) {
        loop {
            // Only one idle worker waits on the channel; the others wait on the lock
            let next = rx.lock().await.recv().await;
            let Some(request) = next else { break };

            let start = Instant::now();
            let outcome = self.process(&request).await;
            self.metrics.record(start.elapsed(), outcome);
        }
        tracing::debug!("Worker {} exiting, queue closed", self.id);
    }

    async fn process(&self, request: &BookingRequest) -> BookingOutcome {
        let flight = &request.flight;
        let seat = request.seat_number.as_str();
        tracing::debug!(
            "Worker {} processing booking {} for {} (seat {})",
            self.id, request.id, request.requester_id, seat
        );

        // 1. Hold the seat
        if !flight.hold_seat(seat) {
            tracing::debug!("Seat {} not available for {}", seat, request.requester_id);
            return BookingOutcome::Failed;
        }

        // 2. Race payment against the deadline
        let result = self.gate.settle(Arc::clone(&request.payment), flight.price).await;

        // 3. Resolve the hold
        match result {
            PaymentResult::Approved => {
                if flight.confirm_seat(seat) {
                    tracing::info!("Ticket confirmed for {} (seat {})", request.requester_id, seat);
                    BookingOutcome::Success
                } else {
                    // Only the holder resolves a Held seat, so this indicates a bug
                    tracing::error!(
                        "Seat {} left Held state while held by {}",
                        seat, request.requester_id
                    );
                    BookingOutcome::Failed
                }
            }
            PaymentResult::Declined => {
                flight.release_seat(seat);
                tracing::warn!("Payment failed for {} (seat {})", request.requester_id, seat);
                BookingOutcome::Failed
            }
            PaymentResult::TimedOut => {
                flight.release_seat(seat);
                tracing::warn!(
                    "Payment timeout after {:?}, booking failed for {} (seat {})",
                    self.gate.deadline(), request.requester_id, seat
                );
                BookingOutcome::Timeout
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Booking queue is full")]
    QueueFull,

    #[error("Booking queue is closed")]
    QueueClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{CardPayment, CryptoPayment};
    use skyhold_core::{Flight, PaymentMethod, SeatStatus};
    use std::time::Duration;

    fn flight() -> Arc<Flight> {
        Arc::new(Flight::new("T100", "Test Air", 1000.0, vec!["A1", "A2"]).unwrap())
    }

    fn request(
        flight: &Arc<Flight>,
        seat: &str,
        payment: Arc<dyn PaymentMethod>,
    ) -> BookingRequest {
        BookingRequest::new("tester", seat, Arc::clone(flight), payment)
    }

    #[tokio::test]
    async fn test_rejects_invalid_config() {
        let config = EngineConfig { workers: 0, ..EngineConfig::default() };
        let result = WorkerPool::start(&config, Arc::new(MetricsAggregator::new()));
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_try_submit_full_queue() {
        // One worker stuck on a slow payment, one queue slot
        let config = EngineConfig {
            workers: 1,
            queue_capacity: 1,
            payment_deadline_ms: 5_000,
        };
        let metrics = Arc::new(MetricsAggregator::new());
        let (queue, pool) = WorkerPool::start(&config, Arc::clone(&metrics)).unwrap();
        assert_eq!(pool.worker_count(), 1);
        assert_eq!(queue.remaining_capacity(), 1);
        let flight = flight();
        let slow: Arc<dyn PaymentMethod> = Arc::new(CryptoPayment::new(Duration::from_millis(300)));

        queue.submit(request(&flight, "A1", Arc::clone(&slow))).await.unwrap();
        // Give the worker time to take the first request off the queue
        tokio::time::sleep(Duration::from_millis(50)).await;
        queue.try_submit(request(&flight, "A2", Arc::clone(&slow))).unwrap();
        assert_eq!(queue.remaining_capacity(), 0);

        let rejected = queue.try_submit(request(&flight, "A2", slow));
        assert!(matches!(rejected, Err(PoolError::QueueFull)));

        drop(queue);
        pool.join().await;
        assert_eq!(metrics.total_requests(), 2);
    }

    #[tokio::test]
    async fn test_submit_after_workers_gone() {
        let config = EngineConfig { workers: 1, ..EngineConfig::default() };
        let (queue, pool) = WorkerPool::start(&config, Arc::new(MetricsAggregator::new())).unwrap();
        let flight = flight();

        for handle in &pool.handles {
            handle.abort();
        }
        let producer = queue.clone();
        pool.join().await;

        let result = producer.submit(request(&flight, "A1", Arc::new(CardPayment))).await;
        assert!(matches!(result, Err(PoolError::QueueClosed)));
    }

    #[tokio::test]
    async fn test_drains_queue_before_stopping() {
        let config = EngineConfig { workers: 4, queue_capacity: 8, payment_deadline_ms: 1_000 };
        let metrics = Arc::new(MetricsAggregator::new());
        let (queue, pool) = WorkerPool::start(&config, Arc::clone(&metrics)).unwrap();
        assert_eq!(pool.worker_count(), 4);
        let flight = flight();

        for _ in 0..20 {
            queue.submit(request(&flight, "A1", Arc::new(CardPayment))).await.unwrap();
        }
        drop(queue);
        pool.join().await;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 20);
        assert_eq!(snapshot.success, 1);
        assert_eq!(snapshot.failed, 19);
        assert_eq!(flight.seat_status("A1"), Some(SeatStatus::Booked));
        assert_eq!(flight.seat_status("A2"), Some(SeatStatus::Available));
    }
}
