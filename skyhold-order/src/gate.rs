use skyhold_core::PaymentMethod;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// How a payment attempt resolved from the caller's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentResult {
    Approved,
    Declined,
    TimedOut,
}

/// Races a payment attempt against a fixed deadline.
///
/// The payment runs on its own task and reports through a oneshot slot, so
/// it can always deliver its answer without blocking. When the deadline wins,
/// the task is left to finish on its own and its answer is dropped; there is
/// no way to cancel an external payment mid-flight.
#[derive(Debug, Clone, Copy)]
pub struct PaymentGate {
    deadline: Duration,
}

impl PaymentGate {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub async fn settle(&self, payment: Arc<dyn PaymentMethod>, amount: f64) -> PaymentResult {
        let (tx, rx) = oneshot::channel();
        let method = payment.name();

        tokio::spawn(async move {
            let approved = payment.pay(amount).await;
            if tx.send(approved).is_err() {
                tracing::warn!(
                    "{} payment of {} finished after the deadline (approved: {}), result discarded",
                    method, amount, approved
                );
            }
        });

        tokio::select! {
            result = rx => match result {
                Ok(true) => PaymentResult::Approved,
                Ok(false) => PaymentResult::Declined,
                // Sender dropped without answering: the payment task panicked
                Err(_) => {
                    tracing::error!("{} payment task ended without a result", method);
                    PaymentResult::Declined
                }
            },
            _ = tokio::time::sleep(self.deadline) => PaymentResult::TimedOut,
        }
    }
}
