//! Environmental impact report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stocking sustainability classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SustainabilityRating {
    Overstocked,
    High,
    Optimal,
    Understocked,
}

impl std::fmt::Display for SustainabilityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SustainabilityRating::Overstocked => write!(f, "overstocked"),
            SustainabilityRating::High => write!(f, "high"),
            SustainabilityRating::Optimal => write!(f, "optimal"),
            SustainabilityRating::Understocked => write!(f, "understocked"),
        }
    }
}

/// Persisted emissions and land-use report for a parcel.
///
/// All gas-split figures are stored explicitly; none is derived by
/// subtracting the others from the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    pub id: Uuid,
    pub parcel_id: Uuid,
    pub annual_emissions_kg_co2e: f64,
    pub methane_kg_co2e: f64,
    pub n2o_kg_co2e: f64,
    pub co2_kg_co2e: f64,
    pub emissions_per_ha_kg_co2e: f64,
    pub cattle_units: f64,
    pub stocking_rate: f64,
    pub rating: SustainabilityRating,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}
