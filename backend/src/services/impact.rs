//! Environmental impact reporting
//!
//! Annualized emissions from per-species factors, a gas breakdown by fixed
//! shares, and a sustainability rating from the cattle-unit stocking rate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared::{ImpactReport, LivestockCounts, ParcelProfile, Species, SustainabilityRating};

/// Annual emissions per animal, kg CO2e per head per year.
pub const EMISSION_FACTORS: [(Species, f64); 3] = [
    (Species::Cattle, 2_200.0),
    (Species::Sheep, 500.0),
    (Species::Goat, 400.0),
];

/// Gas shares of the annual total.
pub const METHANE_SHARE: f64 = 0.45;
pub const N2O_SHARE: f64 = 0.15;
pub const CO2_SHARE: f64 = 0.40;

/// Stocking-rate cutoffs, cattle units per hectare.
pub const OVERSTOCKED_RATE: f64 = 2.5;
pub const HIGH_RATE: f64 = 2.0;
pub const UNDERSTOCKED_RATE: f64 = 0.5;

/// Annual herd emissions, kg CO2e.
pub fn annual_emissions(livestock: &LivestockCounts) -> f64 {
    EMISSION_FACTORS
        .iter()
        .map(|(species, factor)| {
            let head = match species {
                Species::Cattle => livestock.cattle,
                Species::Sheep => livestock.sheep,
                Species::Goat => livestock.goats,
            };
            f64::from(head) * factor
        })
        .sum()
}

/// Rate the stocking pressure. Checked most severe first so the two upper
/// cutoffs stay ordered.
pub fn classify_stocking_rate(rate: f64) -> SustainabilityRating {
    if rate > OVERSTOCKED_RATE {
        SustainabilityRating::Overstocked
    } else if rate > HIGH_RATE {
        SustainabilityRating::High
    } else if rate < UNDERSTOCKED_RATE {
        SustainabilityRating::Understocked
    } else {
        SustainabilityRating::Optimal
    }
}

fn recommendations_for(rating: SustainabilityRating) -> Vec<String> {
    let lines: &[&str] = match rating {
        SustainabilityRating::Overstocked => &[
            "reduce herd size or lease additional grazing area",
            "shorten grazing periods and extend rest rotations",
        ],
        SustainabilityRating::High => &[
            "monitor pasture recovery closely between rotations",
            "plan for supplementary feed in dry months",
        ],
        SustainabilityRating::Optimal => &["maintain current stocking and rotation schedule"],
        SustainabilityRating::Understocked => &[
            "capacity exists for additional livestock",
            "consider conservation cuts to avoid rank growth",
        ],
    };
    lines.iter().map(|line| (*line).to_string()).collect()
}

/// Build the impact report for one parcel.
pub fn build_impact_report(parcel: &ParcelProfile, created_at: DateTime<Utc>) -> ImpactReport {
    let annual = annual_emissions(&parcel.livestock);
    let cattle_units = parcel.livestock.cattle_units();
    let stocking_rate = if parcel.area_ha > 0.0 {
        cattle_units / parcel.area_ha
    } else {
        0.0
    };
    let rating = classify_stocking_rate(stocking_rate);

    ImpactReport {
        id: Uuid::new_v4(),
        parcel_id: parcel.id,
        annual_emissions_kg_co2e: annual,
        methane_kg_co2e: annual * METHANE_SHARE,
        n2o_kg_co2e: annual * N2O_SHARE,
        co2_kg_co2e: annual * CO2_SHARE,
        emissions_per_ha_kg_co2e: if parcel.area_ha > 0.0 {
            annual / parcel.area_ha
        } else {
            0.0
        },
        cattle_units,
        stocking_rate,
        rating,
        recommendations: recommendations_for(rating),
        created_at,
    }
}
