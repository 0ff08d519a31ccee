//! Drought analysis
//!
//! Classifies the trailing-window mean soil-moisture fraction into six
//! ordered severity levels and reports the moving trend over the same
//! window. The cutoffs live in one table so they stay auditable.

use shared::{DroughtAnalysis, DroughtLevel, SignalSeries, SoilMoistureReading, Trend};

/// Trailing window used for the mean and the trend.
pub const DROUGHT_WINDOW_DAYS: usize = 30;

/// Lower moisture bound per level; the first row whose bound the mean
/// reaches applies, so an exact cutoff resolves to the less severe side.
/// Anything below the last row is exceptional.
const LEVEL_CUTOFFS: [(f64, DroughtLevel); 5] = [
    (0.35, DroughtLevel::None),
    (0.30, DroughtLevel::Mild),
    (0.25, DroughtLevel::Moderate),
    (0.20, DroughtLevel::Severe),
    (0.15, DroughtLevel::Extreme),
];

/// Classify a mean soil-moisture fraction.
pub fn classify_moisture(mean_moisture: f64) -> DroughtLevel {
    for (lower_bound, level) in LEVEL_CUTOFFS {
        if mean_moisture >= lower_bound {
            return level;
        }
    }
    DroughtLevel::Exceptional
}

/// Derive the drought indicator from a soil-moisture series. An empty
/// series reports no drought with an absent mean.
pub fn analyze_drought(series: &SignalSeries<SoilMoistureReading>) -> DroughtAnalysis {
    let window = series.trailing_series(DROUGHT_WINDOW_DAYS);
    let mean_moisture = window.mean_by(|r| r.moisture_fraction);

    let level = match mean_moisture {
        Some(mean) => classify_moisture(mean),
        None => DroughtLevel::None,
    };

    DroughtAnalysis {
        level,
        severity: level.severity(),
        mean_moisture,
        trend: if window.is_empty() {
            Trend::Stable
        } else {
            window.trend_by(|r| r.moisture_fraction)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::Observation;

    fn series(fractions: &[f64]) -> SignalSeries<SoilMoistureReading> {
        let observations = fractions
            .iter()
            .enumerate()
            .map(|(i, &moisture_fraction)| Observation {
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                value: SoilMoistureReading { moisture_fraction },
            })
            .collect();
        SignalSeries::from_observations(observations)
    }

    #[test]
    fn classification_covers_all_levels() {
        assert_eq!(classify_moisture(0.40), DroughtLevel::None);
        assert_eq!(classify_moisture(0.32), DroughtLevel::Mild);
        assert_eq!(classify_moisture(0.27), DroughtLevel::Moderate);
        assert_eq!(classify_moisture(0.22), DroughtLevel::Severe);
        assert_eq!(classify_moisture(0.17), DroughtLevel::Extreme);
        assert_eq!(classify_moisture(0.12), DroughtLevel::Exceptional);
    }

    #[test]
    fn boundary_values_resolve_to_less_severe_level() {
        assert_eq!(classify_moisture(0.35), DroughtLevel::None);
        assert_eq!(classify_moisture(0.30), DroughtLevel::Mild);
        assert_eq!(classify_moisture(0.25), DroughtLevel::Moderate);
        assert_eq!(classify_moisture(0.20), DroughtLevel::Severe);
        assert_eq!(classify_moisture(0.15), DroughtLevel::Extreme);
    }

    #[test]
    fn empty_series_reports_no_drought() {
        let analysis = analyze_drought(&SignalSeries::empty());
        assert_eq!(analysis.level, DroughtLevel::None);
        assert_eq!(analysis.severity, 0);
        assert_eq!(analysis.mean_moisture, None);
        assert_eq!(analysis.trend, Trend::Stable);
    }

    #[test]
    fn exceptional_drought_detected() {
        let analysis = analyze_drought(&series(&[0.13, 0.12, 0.11]));
        assert_eq!(analysis.level, DroughtLevel::Exceptional);
        assert_eq!(analysis.severity, 5);
    }

    #[test]
    fn drying_window_trends_declining() {
        let analysis = analyze_drought(&series(&[0.40, 0.38, 0.20, 0.18]));
        assert_eq!(analysis.trend, Trend::Declining);
    }
}
