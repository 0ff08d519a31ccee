//! Vegetation stress analysis
//!
//! Derives a health status from the most recent vegetation-index reading
//! and its trend against the series mean. Also provides the index-scaled
//! biomass estimate the prediction subsystem falls back on.

use shared::{HealthStatus, SignalSeries, StressAnalysis, Trend, VegetationReading};

/// Index below this is critical.
pub const CRITICAL_INDEX_CUTOFF: f64 = 0.3;

/// Index below this (and at or above critical) is a warning.
pub const WARNING_INDEX_CUTOFF: f64 = 0.4;

/// Heuristic biomass scale: kg/ha of dry matter per unit of index.
pub const BIOMASS_PER_INDEX_KG_PER_HA: f64 = 15_000.0;

/// Physically plausible biomass bounds, kg/ha.
pub const BIOMASS_FLOOR_KG_PER_HA: f64 = 2_000.0;
pub const BIOMASS_CEILING_KG_PER_HA: f64 = 15_000.0;

/// Status classification bands: first band whose upper bound exceeds the
/// index applies; anything above the last band is healthy.
const STATUS_BANDS: [(f64, HealthStatus); 2] = [
    (CRITICAL_INDEX_CUTOFF, HealthStatus::Critical),
    (WARNING_INDEX_CUTOFF, HealthStatus::Warning),
];

/// Classify a single vegetation-index value.
pub fn classify_index(index: f64) -> HealthStatus {
    for (upper_bound, status) in STATUS_BANDS {
        if index < upper_bound {
            return status;
        }
    }
    HealthStatus::Healthy
}

/// Index-scaled biomass estimate, clamped to the plausible range.
pub fn heuristic_biomass(index: f64) -> f64 {
    (BIOMASS_PER_INDEX_KG_PER_HA * index)
        .clamp(BIOMASS_FLOOR_KG_PER_HA, BIOMASS_CEILING_KG_PER_HA)
}

/// Derive the stress indicator from a vegetation series. An empty series
/// produces a healthy, alert-free result; provenance fields communicate the
/// missing data.
pub fn analyze_stress(series: &SignalSeries<VegetationReading>) -> StressAnalysis {
    let latest_index = series.latest().map(|v| v.index);
    let mean_index = series.mean_by(|v| v.index);

    let (status, alerts) = match latest_index {
        Some(index) => {
            let status = classify_index(index);
            let alerts = match status {
                HealthStatus::Critical => vec!["low vegetation index".to_string()],
                HealthStatus::Warning => {
                    vec!["vegetation index approaching stress threshold".to_string()]
                }
                HealthStatus::Healthy => Vec::new(),
            };
            (status, alerts)
        }
        None => (HealthStatus::Healthy, Vec::new()),
    };

    StressAnalysis {
        status,
        trend: series.trend_by(|v| v.index),
        alerts,
        latest_index,
        mean_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::Observation;

    fn series(indices: &[f64]) -> SignalSeries<VegetationReading> {
        let observations = indices
            .iter()
            .enumerate()
            .map(|(i, &index)| Observation {
                date: NaiveDate::from_ymd_opt(2026, 4, 1 + i as u32).unwrap(),
                value: VegetationReading { index, evi: None },
            })
            .collect();
        SignalSeries::from_observations(observations)
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify_index(0.25), HealthStatus::Critical);
        assert_eq!(classify_index(0.3), HealthStatus::Warning);
        assert_eq!(classify_index(0.39), HealthStatus::Warning);
        assert_eq!(classify_index(0.4), HealthStatus::Healthy);
        assert_eq!(classify_index(0.85), HealthStatus::Healthy);
    }

    #[test]
    fn critical_index_raises_alert() {
        let analysis = analyze_stress(&series(&[0.5, 0.4, 0.25]));
        assert_eq!(analysis.status, HealthStatus::Critical);
        assert_eq!(analysis.alerts, vec!["low vegetation index".to_string()]);
        assert_eq!(analysis.latest_index, Some(0.25));
    }

    #[test]
    fn empty_series_is_healthy_with_no_alerts() {
        let analysis = analyze_stress(&SignalSeries::empty());
        assert_eq!(analysis.status, HealthStatus::Healthy);
        assert!(analysis.alerts.is_empty());
        assert_eq!(analysis.latest_index, None);
        assert_eq!(analysis.trend, Trend::Stable);
    }

    #[test]
    fn heuristic_biomass_clamps_both_ends() {
        assert_eq!(heuristic_biomass(0.0), BIOMASS_FLOOR_KG_PER_HA);
        assert_eq!(heuristic_biomass(0.05), BIOMASS_FLOOR_KG_PER_HA);
        assert_eq!(heuristic_biomass(0.5), 7_500.0);
        assert_eq!(heuristic_biomass(1.0), BIOMASS_CEILING_KG_PER_HA);
        assert_eq!(heuristic_biomass(1.4), BIOMASS_CEILING_KG_PER_HA);
    }
}
