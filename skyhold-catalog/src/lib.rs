pub mod factory;

pub use factory::{CatalogError, FlightClass, FlightFactory, FlightProfile};
