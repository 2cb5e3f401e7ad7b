use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use skyhold_core::PaymentMethod;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PaymentSettings;

/// Card payments settle immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct CardPayment;

#[async_trait]
impl PaymentMethod for CardPayment {
    async fn pay(&self, amount: f64) -> bool {
        tracing::debug!("Processing payment of {:.2} with card", amount);
        true
    }

    fn name(&self) -> &'static str {
        "card"
    }
}

/// UPI payments take a random whole number of seconds below `max_delay`
#[derive(Debug, Clone, Copy)]
pub struct UpiPayment {
    max_delay: Duration,
}

impl UpiPayment {
    pub fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }
}

#[async_trait]
impl PaymentMethod for UpiPayment {
    async fn pay(&self, amount: f64) -> bool {
        let max_secs = self.max_delay.as_secs();
        let delay = if max_secs == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(rand::thread_rng().gen_range(0..max_secs))
        };

        tracing::debug!("Processing payment of {:.2} with UPI", amount);
        tokio::time::sleep(delay).await;
        tracing::debug!("UPI payment finished in {:?}", delay);
        true
    }

    fn name(&self) -> &'static str {
        "upi"
    }
}

/// Crypto payments wait a fixed confirmation time
#[derive(Debug, Clone, Copy)]
pub struct CryptoPayment {
    confirmation_delay: Duration,
}

impl CryptoPayment {
    pub fn new(confirmation_delay: Duration) -> Self {
        Self { confirmation_delay }
    }
}

#[async_trait]
impl PaymentMethod for CryptoPayment {
    async fn pay(&self, amount: f64) -> bool {
        tracing::debug!("Processing payment of {:.2} with crypto", amount);
        tokio::time::sleep(self.confirmation_delay).await;
        true
    }

    fn name(&self) -> &'static str {
        "crypto"
    }
}

/// Rejects every payment
#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningPayment;

#[async_trait]
impl PaymentMethod for DecliningPayment {
    async fn pay(&self, amount: f64) -> bool {
        tracing::debug!("Declining payment of {:.2}", amount);
        false
    }

    fn name(&self) -> &'static str {
        "declining"
    }
}

/// Strategy selector for configuration files
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    Card,
    Upi,
    Crypto,
    Declining,
}

impl PaymentMethodKind {
    pub fn build(&self, settings: &PaymentSettings) -> Arc<dyn PaymentMethod> {
        match self {
            PaymentMethodKind::Card => Arc::new(CardPayment),
            PaymentMethodKind::Upi => {
                Arc::new(UpiPayment::new(Duration::from_secs(settings.upi_max_delay_secs)))
            }
            PaymentMethodKind::Crypto => {
                let confirmation = Duration::from_millis(settings.crypto_confirmation_ms);
                Arc::new(CryptoPayment::new(confirmation))
            }
            PaymentMethodKind::Declining => Arc::new(DecliningPayment),
        }
    }
}
