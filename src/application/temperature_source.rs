// Source trait for the upstream temperature API
use crate::domain::temperature::{AccumulationSummary, TemperatureSample};
use crate::error::ChartError;
use async_trait::async_trait;

#[async_trait]
pub trait TemperatureSource: Send + Sync {
    /// Raw readings, in the order the API returns them
    async fn fetch_temperatures(&self) -> Result<Vec<TemperatureSample>, ChartError>;

    /// Accumulated temperature and the peaks it was built from
    async fn fetch_accumulation(&self) -> Result<AccumulationSummary, ChartError>;

    /// Clear the readings stored upstream
    async fn reset(&self) -> Result<(), ChartError>;
}
