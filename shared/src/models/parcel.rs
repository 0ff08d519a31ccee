//! Land parcel models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Boundary;

/// Sheep and goats convert to cattle units at this factor.
pub const SMALL_RUMINANT_CATTLE_UNIT: f64 = 0.2;

/// A grazed land parcel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelProfile {
    pub id: Uuid,
    pub name: String,
    pub boundary: Boundary,
    /// Area in hectares
    pub area_ha: f64,
    pub livestock: LivestockCounts,
    pub vegetation: VegetationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Head counts by species
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LivestockCounts {
    pub cattle: u32,
    pub sheep: u32,
    pub goats: u32,
}

impl LivestockCounts {
    pub fn total_head(&self) -> u32 {
        self.cattle + self.sheep + self.goats
    }

    /// Standardized cattle units across species.
    pub fn cattle_units(&self) -> f64 {
        f64::from(self.cattle) + f64::from(self.sheep + self.goats) * SMALL_RUMINANT_CATTLE_UNIT
    }
}

/// Dominant vegetation cover of a parcel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VegetationType {
    Pasture,
    Rangeland,
    Silvopasture,
    CropResidue,
    /// Custom cover with name
    Custom(String),
}

impl std::fmt::Display for VegetationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VegetationType::Pasture => write!(f, "pasture"),
            VegetationType::Rangeland => write!(f, "rangeland"),
            VegetationType::Silvopasture => write!(f, "silvopasture"),
            VegetationType::CropResidue => write!(f, "crop_residue"),
            VegetationType::Custom(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cattle_units_convert_small_ruminants() {
        let counts = LivestockCounts {
            cattle: 50,
            sheep: 30,
            goats: 0,
        };
        assert!((counts.cattle_units() - 56.0).abs() < f64::EPSILON);
        assert_eq!(counts.total_head(), 80);
    }

    #[test]
    fn cattle_units_zero_for_empty_parcel() {
        assert_eq!(LivestockCounts::default().cattle_units(), 0.0);
    }
}
