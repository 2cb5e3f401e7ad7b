use async_trait::async_trait;

/// A way of paying for a seat (card, UPI, crypto, ...).
///
/// Implementations may take arbitrarily long; the caller bounds the wait,
/// not the implementation.
#[async_trait]
pub trait PaymentMethod: Send + Sync {
    /// Charge `amount`, returning whether the payment was approved.
    async fn pay(&self, amount: f64) -> bool;

    /// Short label used in logs and metrics
    fn name(&self) -> &'static str;
}
