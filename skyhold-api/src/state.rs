use std::sync::Arc;
use skyhold_core::Flight;
use skyhold_order::MetricsAggregator;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<MetricsAggregator>,
    pub flight: Arc<Flight>,
}
