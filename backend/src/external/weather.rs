//! Weather API client
//!
//! Open-Meteo-style daily aggregates: the provider returns parallel arrays
//! keyed by date under a `daily` object.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use shared::{DateRange, Observation, SignalSeries, WeatherReading};

use super::{get_with_retry, parse_source_date, SourceError, WeatherProvider};

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_mean: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
    relative_humidity_2m_mean: Vec<f64>,
    wind_speed_10m_max: Vec<f64>,
}

impl WeatherClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    fn source_tag(&self) -> &'static str {
        "open-meteo"
    }

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        range: &DateRange,
    ) -> Result<SignalSeries<WeatherReading>, SourceError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&start_date={}&end_date={}\
             &daily=temperature_2m_mean,temperature_2m_max,temperature_2m_min,\
             precipitation_sum,relative_humidity_2m_mean,wind_speed_10m_max",
            self.base_url, latitude, longitude, range.start, range.end
        );

        let data: ForecastResponse = get_with_retry(&self.client, &url)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let daily = data.daily;
        let n = daily.time.len();
        let lengths = [
            daily.temperature_2m_mean.len(),
            daily.temperature_2m_max.len(),
            daily.temperature_2m_min.len(),
            daily.precipitation_sum.len(),
            daily.relative_humidity_2m_mean.len(),
            daily.wind_speed_10m_max.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(SourceError::Malformed(
                "daily arrays are not the same length".to_string(),
            ));
        }

        let mut observations = Vec::with_capacity(n);
        for i in 0..n {
            observations.push(Observation {
                date: parse_source_date(&daily.time[i])?,
                value: WeatherReading {
                    temp_c: daily.temperature_2m_mean[i],
                    temp_max_c: daily.temperature_2m_max[i],
                    temp_min_c: daily.temperature_2m_min[i],
                    rainfall_mm: daily.precipitation_sum[i],
                    humidity_percent: daily.relative_humidity_2m_mean[i],
                    wind_speed_mps: daily.wind_speed_10m_max[i],
                },
            });
        }
        Ok(SignalSeries::from_observations(observations))
    }
}
