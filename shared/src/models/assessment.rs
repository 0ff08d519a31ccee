//! Assessment record and derived indicators
//!
//! The `Assessment` is the terminal record of one decision-engine run:
//! a parcel snapshot, every derived indicator, the prediction result, the
//! overall score and the provenance of each input signal. It is append-only;
//! a newer assessment supersedes an older one by timestamp alone.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::parcel::ParcelProfile;
use crate::models::signal::Trend;
use crate::types::DateRange;

/// Vegetation health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Warning => write!(f, "warning"),
            HealthStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Vegetation stress indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressAnalysis {
    pub status: HealthStatus,
    pub trend: Trend,
    pub alerts: Vec<String>,
    pub latest_index: Option<f64>,
    pub mean_index: Option<f64>,
}

/// Drought severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DroughtLevel {
    None,
    Mild,
    Moderate,
    Severe,
    Extreme,
    Exceptional,
}

impl DroughtLevel {
    /// Numeric severity, 0 (none) through 5 (exceptional).
    pub fn severity(&self) -> u8 {
        match self {
            DroughtLevel::None => 0,
            DroughtLevel::Mild => 1,
            DroughtLevel::Moderate => 2,
            DroughtLevel::Severe => 3,
            DroughtLevel::Extreme => 4,
            DroughtLevel::Exceptional => 5,
        }
    }
}

impl std::fmt::Display for DroughtLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DroughtLevel::None => write!(f, "none"),
            DroughtLevel::Mild => write!(f, "mild"),
            DroughtLevel::Moderate => write!(f, "moderate"),
            DroughtLevel::Severe => write!(f, "severe"),
            DroughtLevel::Extreme => write!(f, "extreme"),
            DroughtLevel::Exceptional => write!(f, "exceptional"),
        }
    }
}

/// Drought indicator derived from soil moisture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DroughtAnalysis {
    pub level: DroughtLevel,
    pub severity: u8,
    pub mean_moisture: Option<f64>,
    pub trend: Trend,
}

/// Day counts at escalating heat severity bands
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeatStressSummary {
    pub alert_days: u32,
    pub danger_days: u32,
    pub emergency_days: u32,
    pub recommendations: Vec<String>,
}

/// Day counts at escalating cold severity bands
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ColdStressSummary {
    pub mild_days: u32,
    pub moderate_days: u32,
    pub severe_days: u32,
    pub recommendations: Vec<String>,
}

/// Grazing rotation plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrazingPlan {
    pub available_feed_kg: f64,
    pub usable_feed_kg: f64,
    pub grazing_days: u32,
    pub recommended_rest_days: u32,
    pub next_rotation: NaiveDate,
    /// Cattle units per hectare
    pub stocking_rate: f64,
}

/// How a predicted value was produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    Model,
    Heuristic,
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionMethod::Model => write!(f, "model"),
            PredictionMethod::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// A predicted scalar with its provenance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictedValue {
    pub value: f64,
    pub method: PredictionMethod,
}

/// Result of the prediction subsystem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub biomass_kg_per_ha: PredictedValue,
    pub feed_demand_kg_per_day: PredictedValue,
}

/// Which reader served each input signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalProvenance {
    pub vegetation: String,
    pub soil_moisture: String,
    pub weather: String,
}

/// Persisted assessment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub parcel: ParcelProfile,
    pub period: DateRange,
    pub stress: StressAnalysis,
    pub drought: DroughtAnalysis,
    pub heat: HeatStressSummary,
    pub cold: ColdStressSummary,
    pub grazing: GrazingPlan,
    pub prediction: PredictionResult,
    /// Overall health score, 0-100
    pub score: i32,
    pub sources: SignalProvenance,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drought_levels_are_ordered_by_severity() {
        let levels = [
            DroughtLevel::None,
            DroughtLevel::Mild,
            DroughtLevel::Moderate,
            DroughtLevel::Severe,
            DroughtLevel::Extreme,
            DroughtLevel::Exceptional,
        ];
        for (i, level) in levels.iter().enumerate() {
            assert_eq!(level.severity() as usize, i);
        }
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
