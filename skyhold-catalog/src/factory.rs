use serde::{Deserialize, Serialize};
use skyhold_core::{CoreError, Flight};
use std::str::FromStr;

/// Flight classes the factory knows how to build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlightClass {
    Domestic,
    International,
}

/// Static attributes of a flight class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub price: f64,
}

impl FlightClass {
    pub fn profile(&self) -> FlightProfile {
        match self {
            FlightClass::Domestic => FlightProfile {
                id: "D101",
                name: "IndiGo",
                price: 5000.0,
            },
            FlightClass::International => FlightProfile {
                id: "I201",
                name: "Air India",
                price: 25000.0,
            },
        }
    }
}

impl FromStr for FlightClass {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(FlightClass::Domestic),
            "international" => Ok(FlightClass::International),
            _ => Err(CatalogError::UnknownClass(s.to_string())),
        }
    }
}

/// Builds flights with a single row of seats numbered A1..An
pub struct FlightFactory;

impl FlightFactory {
    pub fn create(class: FlightClass, capacity: usize) -> Result<Flight, CatalogError> {
        if capacity == 0 {
            return Err(CatalogError::InvalidCapacity(capacity));
        }

        let profile = class.profile();
        let flight = Flight::new(
            profile.id,
            profile.name,
            profile.price,
            (1..=capacity).map(|i| format!("A{}", i)),
        )?;

        tracing::info!(
            "Created {:?} flight {} ({}) with {} seats",
            class, flight.id, flight.name, capacity
        );
        Ok(flight)
    }

    /// Convenience for configuration values such as `"domestic"`
    pub fn create_named(class: &str, capacity: usize) -> Result<Flight, CatalogError> {
        Self::create(class.parse()?, capacity)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown flight class: {0}")]
    UnknownClass(String),

    #[error("Invalid seat capacity: {0}")]
    InvalidCapacity(usize),

    #[error(transparent)]
    Core(#[from] CoreError),
}
