//! Time-series signal models
//!
//! Every upstream data source is normalized into a `SignalSeries` of dated
//! readings. An empty series is a valid value everywhere downstream; it
//! means "no data", never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation<T> {
    pub date: NaiveDate,
    pub value: T,
}

/// Date-ordered sequence of readings for one signal.
///
/// Construction sorts by date ascending, so consumers can rely on ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalSeries<T> {
    observations: Vec<Observation<T>>,
}

impl<T> Default for SignalSeries<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> SignalSeries<T> {
    pub fn empty() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    pub fn from_observations(mut observations: Vec<Observation<T>>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation<T>> {
        self.observations.iter()
    }

    /// Most recent reading, if any.
    pub fn latest(&self) -> Option<&T> {
        self.observations.last().map(|o| &o.value)
    }

    /// Last `n` observations in date order.
    pub fn trailing(&self, n: usize) -> &[Observation<T>] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }

    /// Last `n` observations as their own series.
    pub fn trailing_series(&self, n: usize) -> SignalSeries<T>
    where
        T: Clone,
    {
        SignalSeries {
            observations: self.trailing(n).to_vec(),
        }
    }

    /// Mean of a scalar projection of the readings. `None` when empty.
    pub fn mean_by(&self, f: impl Fn(&T) -> f64) -> Option<f64> {
        if self.observations.is_empty() {
            return None;
        }
        let sum: f64 = self.observations.iter().map(|o| f(&o.value)).sum();
        Some(sum / self.observations.len() as f64)
    }

    /// Direction of a scalar projection over the series: the mean of the
    /// most recent half is compared against the overall mean with a 5%
    /// relative tolerance. Series with fewer than two readings are stable.
    pub fn trend_by(&self, f: impl Fn(&T) -> f64) -> Trend {
        if self.observations.len() < 2 {
            return Trend::Stable;
        }
        let overall = match self.mean_by(&f) {
            Some(m) => m,
            None => return Trend::Stable,
        };
        let recent = self.trailing(self.observations.len().div_ceil(2));
        let recent_mean =
            recent.iter().map(|o| f(&o.value)).sum::<f64>() / recent.len() as f64;

        let tolerance = overall.abs() * 0.05;
        if recent_mean > overall + tolerance {
            Trend::Improving
        } else if recent_mean < overall - tolerance {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// Moving direction of a signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Vegetation index reading (NDVI-style, used as [0, 1] here)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VegetationReading {
    pub index: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evi: Option<f64>,
}

/// Volumetric soil moisture reading, 0-1 scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilMoistureReading {
    pub moisture_fraction: f64,
}

/// Daily weather reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub temp_c: f64,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub rainfall_mm: f64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
}
