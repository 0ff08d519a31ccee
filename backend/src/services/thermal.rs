//! Heat and cold stress summaries
//!
//! Counts days at escalating temperature bands. A day counts only in its
//! highest triggered tier, so the stored counts are explicit and disjoint.

use shared::{ColdStressSummary, HeatStressSummary, SignalSeries, WeatherReading};

/// Heat tiers: minimum daily-max temperature per tier, most severe first.
pub const HEAT_EMERGENCY_C: f64 = 40.0;
pub const HEAT_DANGER_C: f64 = 35.0;
pub const HEAT_ALERT_C: f64 = 30.0;

/// Cold tiers: maximum daily-min temperature per tier, most severe first.
pub const COLD_SEVERE_C: f64 = -10.0;
pub const COLD_MODERATE_C: f64 = -5.0;
pub const COLD_MILD_C: f64 = 0.0;

/// Per-tier advice, most severe tier first, matching the count arrays.
const HEAT_RECOMMENDATIONS: [&str; 3] = [
    "provide emergency shade and unrestricted water access",
    "shift grazing to early morning and evening hours",
    "monitor water intake and avoid midday handling",
];

const COLD_RECOMMENDATIONS: [&str; 3] = [
    "provide windbreaks and increase feed rations immediately",
    "increase feed allowance to cover maintenance energy",
    "check water points for icing",
];

/// Count heat-stress days per tier over a weather series.
pub fn analyze_heat(series: &SignalSeries<WeatherReading>) -> HeatStressSummary {
    let mut summary = HeatStressSummary::default();
    for observation in series.iter() {
        let max = observation.value.temp_max_c;
        if max >= HEAT_EMERGENCY_C {
            summary.emergency_days += 1;
        } else if max >= HEAT_DANGER_C {
            summary.danger_days += 1;
        } else if max >= HEAT_ALERT_C {
            summary.alert_days += 1;
        }
    }

    let tier_counts = [
        summary.emergency_days,
        summary.danger_days,
        summary.alert_days,
    ];
    for (recommendation, days) in HEAT_RECOMMENDATIONS.iter().zip(tier_counts) {
        if days > 0 {
            summary.recommendations.push((*recommendation).to_string());
        }
    }
    summary
}

/// Count cold-stress days per tier over a weather series.
pub fn analyze_cold(series: &SignalSeries<WeatherReading>) -> ColdStressSummary {
    let mut summary = ColdStressSummary::default();
    for observation in series.iter() {
        let min = observation.value.temp_min_c;
        if min <= COLD_SEVERE_C {
            summary.severe_days += 1;
        } else if min <= COLD_MODERATE_C {
            summary.moderate_days += 1;
        } else if min <= COLD_MILD_C {
            summary.mild_days += 1;
        }
    }

    let tier_counts = [summary.severe_days, summary.moderate_days, summary.mild_days];
    for (recommendation, days) in COLD_RECOMMENDATIONS.iter().zip(tier_counts) {
        if days > 0 {
            summary.recommendations.push((*recommendation).to_string());
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::Observation;

    fn weather_day(i: usize, temp_max_c: f64, temp_min_c: f64) -> Observation<WeatherReading> {
        Observation {
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap() + chrono::Duration::days(i as i64),
            value: WeatherReading {
                temp_c: (temp_max_c + temp_min_c) / 2.0,
                temp_max_c,
                temp_min_c,
                rainfall_mm: 0.0,
                humidity_percent: 50.0,
                wind_speed_mps: 3.0,
            },
        }
    }

    #[test]
    fn heat_days_count_only_their_highest_tier() {
        let series = SignalSeries::from_observations(vec![
            weather_day(0, 41.0, 25.0), // emergency
            weather_day(1, 36.0, 22.0), // danger
            weather_day(2, 31.0, 18.0), // alert
            weather_day(3, 28.0, 15.0), // none
        ]);
        let summary = analyze_heat(&series);
        assert_eq!(summary.emergency_days, 1);
        assert_eq!(summary.danger_days, 1);
        assert_eq!(summary.alert_days, 1);
        assert_eq!(summary.recommendations.len(), 3);
        assert_eq!(
            summary.recommendations[0],
            "provide emergency shade and unrestricted water access"
        );
    }

    #[test]
    fn recommendations_cover_only_triggered_tiers() {
        let series = SignalSeries::from_observations(vec![weather_day(0, 31.0, 18.0)]);
        let summary = analyze_heat(&series);
        assert_eq!(
            summary.recommendations,
            vec!["monitor water intake and avoid midday handling".to_string()]
        );
    }

    #[test]
    fn cold_days_count_only_their_highest_tier() {
        let series = SignalSeries::from_observations(vec![
            weather_day(0, 5.0, -12.0), // severe
            weather_day(1, 4.0, -6.0),  // moderate
            weather_day(2, 6.0, -1.0),  // mild
            weather_day(3, 10.0, 2.0),  // none
        ]);
        let summary = analyze_cold(&series);
        assert_eq!(summary.severe_days, 1);
        assert_eq!(summary.moderate_days, 1);
        assert_eq!(summary.mild_days, 1);
    }

    #[test]
    fn empty_series_yields_zero_counts() {
        let heat = analyze_heat(&SignalSeries::empty());
        assert_eq!(
            (heat.alert_days, heat.danger_days, heat.emergency_days),
            (0, 0, 0)
        );
        assert!(heat.recommendations.is_empty());

        let cold = analyze_cold(&SignalSeries::empty());
        assert_eq!(
            (cold.mild_days, cold.moderate_days, cold.severe_days),
            (0, 0, 0)
        );
    }
}
