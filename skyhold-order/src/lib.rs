pub mod config;
pub mod gate;
pub mod metrics;
pub mod pool;
pub mod strategies;

pub use config::{EngineConfig, PaymentSettings};
pub use gate::{PaymentGate, PaymentResult};
pub use metrics::{MetricsAggregator, MetricsSnapshot};
pub use pool::{BookingQueue, PoolError, WorkerPool};
pub use strategies::{CardPayment, CryptoPayment, DecliningPayment, PaymentMethodKind, UpiPayment};
