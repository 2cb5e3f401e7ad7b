use skyhold_core::BookingOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Booking counters shared by every worker.
///
/// All updates are atomic adds, so recording never takes a lock. Counters
/// only grow for the lifetime of the aggregator.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    total_requests: AtomicU64,
    success: AtomicU64,
    failed: AtomicU64,
    timeout: AtomicU64,
    total_latency_nanos: AtomicU64,
}

/// Point-in-time copy of the counters for reporting.
///
/// Fields are loaded one by one, so a snapshot taken while requests are
/// being recorded may be off by the in-flight updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub success: u64,
    pub failed: u64,
    pub timeout: u64,
    pub average_latency: Duration,
}

impl MetricsSnapshot {
    pub fn resolved(&self) -> u64 {
        self.success + self.failed + self.timeout
    }
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, duration: Duration, outcome: BookingOutcome) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        self.total_latency_nanos.fetch_add(nanos, Ordering::Relaxed);
        let counter = match outcome {
            BookingOutcome::Success => &self.success,
            BookingOutcome::Failed => &self.failed,
            BookingOutcome::Timeout => &self.timeout,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        // Total last, so a reader never sees more totals than outcomes
        self.total_requests.fetch_add(1, Ordering::Release);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Acquire)
    }

    /// Mean latency over all recorded requests; zero before the first one.
    pub fn average_latency(&self) -> Duration {
        let total = self.total_requests.load(Ordering::Acquire);
        if total == 0 {
            return Duration::ZERO;
        }
        let latency = self.total_latency_nanos.load(Ordering::Relaxed);
        Duration::from_nanos(latency / total)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests(),
            success: self.success.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timeout: self.timeout.load(Ordering::Relaxed),
            average_latency: self.average_latency(),
        }
    }
}
