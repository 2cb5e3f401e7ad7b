use serde::Deserialize;
use skyhold_catalog::FlightClass;
use skyhold_order::{EngineConfig, PaymentMethodKind, PaymentSettings};
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub payment: PaymentSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 { 8080 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

/// Synthetic load fed into the engine at startup
#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_flight_class")]
    pub flight_class: FlightClass,
    #[serde(default = "default_seats")]
    pub seats: usize,
    #[serde(default = "default_requests")]
    pub requests: usize,
    #[serde(default = "default_payment")]
    pub payment: PaymentMethodKind,
}

fn default_enabled() -> bool { true }
fn default_flight_class() -> FlightClass { FlightClass::Domestic }
fn default_seats() -> usize { 100 }
fn default_requests() -> usize { 20_000 }
fn default_payment() -> PaymentMethodKind { PaymentMethodKind::Upi }

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            flight_class: default_flight_class(),
            seats: default_seats(),
            requests: default_requests(),
            payment: default_payment(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Every layer is optional; built-in defaults cover missing keys
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `SKYHOLD__ENGINE__WORKERS=50` would set `engine.workers`
            .add_source(
                config::Environment::with_prefix("SKYHOLD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config: AppConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engine.workers, 100);
        assert_eq!(config.engine.payment_deadline_ms, 8_000);
        assert_eq!(config.demo.flight_class, FlightClass::Domestic);
        assert_eq!(config.demo.payment, PaymentMethodKind::Upi);
        assert_eq!(config.demo.requests, 20_000);
        assert_eq!(config.payment.upi_max_delay_secs, 10);
    }

    #[test]
    fn test_overrides() {
        let config: AppConfig = config::Config::builder()
            .set_override("engine.workers", 8)
            .unwrap()
            .set_override("demo.payment", "card")
            .unwrap()
            .set_override("demo.flight_class", "international")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.engine.workers, 8);
        assert_eq!(config.engine.queue_capacity, 100);
        assert_eq!(config.demo.payment, PaymentMethodKind::Card);
        assert_eq!(config.demo.flight_class, FlightClass::International);
    }
}
