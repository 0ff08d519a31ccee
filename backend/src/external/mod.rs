//! Clients for external signal providers
//!
//! Each upstream source gets its own reqwest client that normalizes the
//! provider's wire format into a `SignalSeries`. A request that succeeds
//! with no readings is a valid empty series; only transport or payload
//! failures produce a `SourceError`. Every client retries a failed request
//! once; fallback across readers is the resolution selector's job.

pub mod soil_moisture;
pub mod vegetation;
pub mod weather;

pub use soil_moisture::SoilMoistureClient;
pub use vegetation::{CoarseVegetationClient, HighResVegetationClient};
pub use weather::WeatherClient;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use shared::{
    Boundary, DateRange, SignalSeries, SoilMoistureReading, VegetationReading, WeatherReading,
};

/// Failure of one signal provider. Always recovered locally by the caller
/// (fallback reader or empty series), never surfaced to the user.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source request failed: {0}")]
    Request(String),

    #[error("source returned status {0}")]
    Status(u16),

    #[error("source returned malformed payload: {0}")]
    Malformed(String),
}

/// Vegetation index reader
#[async_trait]
pub trait VegetationProvider: Send + Sync {
    /// Provenance tag recorded when this reader serves the result
    fn source_tag(&self) -> &'static str;

    async fn fetch(
        &self,
        boundary: &Boundary,
        range: &DateRange,
    ) -> Result<SignalSeries<VegetationReading>, SourceError>;
}

/// Soil-moisture time-series reader
#[async_trait]
pub trait SoilMoistureProvider: Send + Sync {
    fn source_tag(&self) -> &'static str;

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        range: &DateRange,
    ) -> Result<SignalSeries<SoilMoistureReading>, SourceError>;
}

/// Weather time-series reader
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn source_tag(&self) -> &'static str;

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        range: &DateRange,
    ) -> Result<SignalSeries<WeatherReading>, SourceError>;
}

/// Issue a GET, retrying once on transport failure.
pub(crate) async fn get_with_retry(
    client: &reqwest::Client,
    url: &str,
) -> Result<reqwest::Response, SourceError> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(first) => {
            tracing::warn!("source request failed, retrying once: {}", first);
            client
                .get(url)
                .send()
                .await
                .map_err(|e| SourceError::Request(e.to_string()))?
        }
    };

    if !response.status().is_success() {
        return Err(SourceError::Status(response.status().as_u16()));
    }
    Ok(response)
}

/// Parse a provider date field (YYYY-MM-DD).
pub(crate) fn parse_source_date(raw: &str) -> Result<NaiveDate, SourceError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| SourceError::Malformed(format!("bad date {:?}: {}", raw, e)))
}
