//! Vegetation index API clients
//!
//! Two readers serve the same signal at different resolutions: a
//! Sentinel-2-style scene service for small parcels and a MODIS-style
//! 250 m-grid service for everything else. Which one is attempted is the
//! resolution selector's decision, not the clients'.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use shared::{Boundary, DateRange, Observation, SignalSeries, VegetationReading};

use super::{get_with_retry, parse_source_date, SourceError, VegetationProvider};

/// High-resolution (10 m-class) vegetation index client
#[derive(Clone)]
pub struct HighResVegetationClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Coarse (250 m-equivalent) vegetation index client
#[derive(Clone)]
pub struct CoarseVegetationClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Scene-service response: one record per acquisition
#[derive(Debug, Deserialize)]
struct SceneResponse {
    observations: Vec<SceneObservation>,
}

#[derive(Debug, Deserialize)]
struct SceneObservation {
    date: String,
    ndvi: f64,
    evi: Option<f64>,
}

/// Grid-service response: parallel date/value arrays
#[derive(Debug, Deserialize)]
struct GridResponse {
    dates: Vec<String>,
    ndvi: Vec<f64>,
}

impl HighResVegetationClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl VegetationProvider for HighResVegetationClient {
    fn source_tag(&self) -> &'static str {
        "sentinel2"
    }

    async fn fetch(
        &self,
        boundary: &Boundary,
        range: &DateRange,
    ) -> Result<SignalSeries<VegetationReading>, SourceError> {
        let point = boundary.centroid();
        let url = format!(
            "{}/ndvi?lat={}&lon={}&start={}&end={}&resolution=10m&api_key={}",
            self.base_url, point.latitude, point.longitude, range.start, range.end, self.api_key
        );

        let data: SceneResponse = get_with_retry(&self.client, &url)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let mut observations = Vec::with_capacity(data.observations.len());
        for scene in data.observations {
            observations.push(Observation {
                date: parse_source_date(&scene.date)?,
                value: VegetationReading {
                    index: scene.ndvi,
                    evi: scene.evi,
                },
            });
        }
        Ok(SignalSeries::from_observations(observations))
    }
}

impl CoarseVegetationClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl VegetationProvider for CoarseVegetationClient {
    fn source_tag(&self) -> &'static str {
        "modis"
    }

    async fn fetch(
        &self,
        boundary: &Boundary,
        range: &DateRange,
    ) -> Result<SignalSeries<VegetationReading>, SourceError> {
        let point = boundary.centroid();
        let url = format!(
            "{}/ndvi/subset?latitude={}&longitude={}&start_date={}&end_date={}&api_key={}",
            self.base_url, point.latitude, point.longitude, range.start, range.end, self.api_key
        );

        let data: GridResponse = get_with_retry(&self.client, &url)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        if data.dates.len() != data.ndvi.len() {
            return Err(SourceError::Malformed(format!(
                "date/value length mismatch: {} vs {}",
                data.dates.len(),
                data.ndvi.len()
            )));
        }

        let mut observations = Vec::with_capacity(data.dates.len());
        for (date, ndvi) in data.dates.iter().zip(data.ndvi) {
            observations.push(Observation {
                date: parse_source_date(date)?,
                value: VegetationReading {
                    index: ndvi,
                    evi: None,
                },
            });
        }
        Ok(SignalSeries::from_observations(observations))
    }
}
