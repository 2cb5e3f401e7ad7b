use serde::Deserialize;
use std::time::Duration;

use crate::pool::PoolError;

/// Sizing and deadline for the booking worker pool
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_payment_deadline_ms")]
    pub payment_deadline_ms: u64,
}

fn default_workers() -> usize { 100 }
fn default_queue_capacity() -> usize { 100 }
fn default_payment_deadline_ms() -> u64 { 8_000 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            payment_deadline_ms: default_payment_deadline_ms(),
        }
    }
}

impl EngineConfig {
    pub fn payment_deadline(&self) -> Duration {
        Duration::from_millis(self.payment_deadline_ms)
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.workers == 0 {
            return Err(PoolError::InvalidConfig("workers must be at least 1".to_string()));
        }
        if self.queue_capacity == 0 {
            return Err(PoolError::InvalidConfig("queue_capacity must be at least 1".to_string()));
        }
        if self.payment_deadline_ms == 0 {
            return Err(PoolError::InvalidConfig(
                "payment_deadline_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tuning for the bundled payment strategies
#[derive(Debug, Deserialize, Clone)]
pub struct PaymentSettings {
    #[serde(default = "default_upi_max_delay_secs")]
    pub upi_max_delay_secs: u64,
    #[serde(default = "default_crypto_confirmation_ms")]
    pub crypto_confirmation_ms: u64,
}

fn default_upi_max_delay_secs() -> u64 { 10 }
fn default_crypto_confirmation_ms() -> u64 { 3_000 }

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            upi_max_delay_secs: default_upi_max_delay_secs(),
            crypto_confirmation_ms: default_crypto_confirmation_ms(),
        }
    }
}
