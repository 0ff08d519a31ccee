//! Soil-moisture API client
//!
//! SMAP-style retrieval of volumetric soil moisture. The service reports
//! gaps as missing dates rather than errors, so an empty payload is a
//! normal response.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use shared::{DateRange, Observation, SignalSeries, SoilMoistureReading};

use super::{get_with_retry, parse_source_date, SoilMoistureProvider, SourceError};

#[derive(Clone)]
pub struct SoilMoistureClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MoistureResponse {
    dates: Vec<String>,
    soil_moisture: Vec<f64>,
}

impl SoilMoistureClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl SoilMoistureProvider for SoilMoistureClient {
    fn source_tag(&self) -> &'static str {
        "smap"
    }

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        range: &DateRange,
    ) -> Result<SignalSeries<SoilMoistureReading>, SourceError> {
        let url = format!(
            "{}/moisture?lat={}&lon={}&start={}&end={}",
            self.base_url, latitude, longitude, range.start, range.end
        );

        let data: MoistureResponse = get_with_retry(&self.client, &url)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        if data.dates.len() != data.soil_moisture.len() {
            return Err(SourceError::Malformed(format!(
                "date/value length mismatch: {} vs {}",
                data.dates.len(),
                data.soil_moisture.len()
            )));
        }

        let mut observations = Vec::with_capacity(data.dates.len());
        for (date, moisture_fraction) in data.dates.iter().zip(data.soil_moisture) {
            observations.push(Observation {
                date: parse_source_date(date)?,
                value: SoilMoistureReading { moisture_fraction },
            });
        }
        Ok(SignalSeries::from_observations(observations))
    }
}
