//! Overall condition scoring
//!
//! Starts from 100 and subtracts fixed penalties per indicator. Each
//! penalty table is data, not branching code, so the deductions can be
//! read and audited in one place.

use shared::{
    ColdStressSummary, DroughtAnalysis, DroughtLevel, HealthStatus, HeatStressSummary,
    StressAnalysis,
};

const VEGETATION_PENALTIES: [(HealthStatus, i32); 3] = [
    (HealthStatus::Critical, 40),
    (HealthStatus::Warning, 20),
    (HealthStatus::Healthy, 0),
];

const DROUGHT_PENALTIES: [(DroughtLevel, i32); 6] = [
    (DroughtLevel::Exceptional, 30),
    (DroughtLevel::Extreme, 25),
    (DroughtLevel::Severe, 20),
    (DroughtLevel::Moderate, 10),
    (DroughtLevel::Mild, 5),
    (DroughtLevel::None, 0),
];

/// Thermal penalty rows: a tier's day count must exceed its threshold to
/// charge the penalty, and only the most severe triggered row applies.
const HEAT_PENALTIES: [(u32, i32); 3] = [(0, 15), (2, 10), (5, 5)];
const COLD_PENALTIES: [(u32, i32); 3] = [(3, 15), (5, 10), (7, 5)];

fn vegetation_penalty(stress: &StressAnalysis) -> i32 {
    VEGETATION_PENALTIES
        .iter()
        .find(|(status, _)| *status == stress.status)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

fn drought_penalty(drought: &DroughtAnalysis) -> i32 {
    DROUGHT_PENALTIES
        .iter()
        .find(|(level, _)| *level == drought.level)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

fn tiered_penalty(day_counts: [u32; 3], penalties: &[(u32, i32); 3]) -> i32 {
    penalties
        .iter()
        .zip(day_counts)
        .find(|((threshold, _), days)| *days > *threshold)
        .map(|((_, penalty), _)| *penalty)
        .unwrap_or(0)
}

fn heat_penalty(heat: &HeatStressSummary) -> i32 {
    tiered_penalty(
        [heat.emergency_days, heat.danger_days, heat.alert_days],
        &HEAT_PENALTIES,
    )
}

fn cold_penalty(cold: &ColdStressSummary) -> i32 {
    tiered_penalty(
        [cold.severe_days, cold.moderate_days, cold.mild_days],
        &COLD_PENALTIES,
    )
}

/// Compute the 0-100 condition score from the four indicators.
pub fn overall_score(
    stress: &StressAnalysis,
    drought: &DroughtAnalysis,
    heat: &HeatStressSummary,
    cold: &ColdStressSummary,
) -> i32 {
    let deductions = vegetation_penalty(stress)
        + drought_penalty(drought)
        + heat_penalty(heat)
        + cold_penalty(cold);
    (100 - deductions).clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Trend;

    fn stress(status: HealthStatus) -> StressAnalysis {
        StressAnalysis {
            status,
            trend: Trend::Stable,
            alerts: Vec::new(),
            latest_index: None,
            mean_index: None,
        }
    }

    fn drought(level: DroughtLevel) -> DroughtAnalysis {
        DroughtAnalysis {
            level,
            severity: level.severity(),
            mean_moisture: None,
            trend: Trend::Stable,
        }
    }

    #[test]
    fn benign_indicators_score_full_marks() {
        let score = overall_score(
            &stress(HealthStatus::Healthy),
            &drought(DroughtLevel::None),
            &HeatStressSummary::default(),
            &ColdStressSummary::default(),
        );
        assert_eq!(score, 100);
    }

    #[test]
    fn critical_vegetation_and_exceptional_drought_stack() {
        let score = overall_score(
            &stress(HealthStatus::Critical),
            &drought(DroughtLevel::Exceptional),
            &HeatStressSummary::default(),
            &ColdStressSummary::default(),
        );
        assert_eq!(score, 100 - 40 - 30);
    }

    #[test]
    fn heat_charges_only_the_most_severe_tier() {
        let heat = HeatStressSummary {
            emergency_days: 1,
            danger_days: 6,
            alert_days: 10,
            recommendations: Vec::new(),
        };
        assert_eq!(heat_penalty(&heat), 15);

        let no_emergency = HeatStressSummary {
            emergency_days: 0,
            danger_days: 3,
            alert_days: 10,
            recommendations: Vec::new(),
        };
        assert_eq!(heat_penalty(&no_emergency), 10);

        let alert_only = HeatStressSummary {
            emergency_days: 0,
            danger_days: 2,
            alert_days: 6,
            recommendations: Vec::new(),
        };
        assert_eq!(heat_penalty(&alert_only), 5);

        let below_thresholds = HeatStressSummary {
            emergency_days: 0,
            danger_days: 2,
            alert_days: 5,
            recommendations: Vec::new(),
        };
        assert_eq!(heat_penalty(&below_thresholds), 0);
    }

    #[test]
    fn cold_thresholds_are_exclusive() {
        let cold = ColdStressSummary {
            severe_days: 3,
            moderate_days: 6,
            mild_days: 0,
            recommendations: Vec::new(),
        };
        // severe_days == 3 does not exceed its threshold, moderate does.
        assert_eq!(cold_penalty(&cold), 10);
    }

    #[test]
    fn worst_case_floors_at_zero() {
        let heat = HeatStressSummary {
            emergency_days: 5,
            danger_days: 5,
            alert_days: 5,
            recommendations: Vec::new(),
        };
        let cold = ColdStressSummary {
            severe_days: 10,
            moderate_days: 10,
            mild_days: 10,
            recommendations: Vec::new(),
        };
        let score = overall_score(
            &stress(HealthStatus::Critical),
            &drought(DroughtLevel::Exceptional),
            &heat,
            &cold,
        );
        assert_eq!(score, 0);
    }
}
