//! Feed planning
//!
//! Projects daily dry-matter demand from fixed per-head rates, adjusted by
//! a single weather factor, over the requested period and prices the total
//! at a per-kg rate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{DateRange, FeedPlan, LivestockCounts, SignalSeries, Species, WeatherReading};

/// Daily dry-matter demand per head, kg.
pub const DAILY_FEED_KG_PER_HEAD: [(Species, f64); 3] = [
    (Species::Cattle, 25.0),
    (Species::Sheep, 2.5),
    (Species::Goat, 2.0),
];

/// Weather adjustment rules; the largest triggered factor wins.
pub const COLD_SPELL_FACTOR: f64 = 1.15;
pub const HEAT_FACTOR: f64 = 1.10;
pub const SUSTAINED_RAIN_FACTOR: f64 = 1.05;

const COLD_SPELL_MEAN_MIN_C: f64 = 0.0;
const HEAT_MEAN_MAX_C: f64 = 32.0;
const SUSTAINED_RAIN_TOTAL_MM: f64 = 100.0;

/// Baseline daily demand across the herd, before weather adjustment.
pub fn baseline_daily_demand(livestock: &LivestockCounts) -> f64 {
    DAILY_FEED_KG_PER_HEAD
        .iter()
        .map(|(species, rate)| {
            let head = match species {
                Species::Cattle => livestock.cattle,
                Species::Sheep => livestock.sheep,
                Species::Goat => livestock.goats,
            };
            f64::from(head) * rate
        })
        .sum()
}

/// A demand multiplier with its human-readable justification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherAdjustment {
    pub factor: f64,
    pub reason: &'static str,
}

/// Derive the feed adjustment from temperature and rainfall extremes. An
/// empty series means no adjustment.
pub fn weather_adjustment(weather: &SignalSeries<WeatherReading>) -> WeatherAdjustment {
    let mean_min = weather.mean_by(|r| r.temp_min_c);
    let mean_max = weather.mean_by(|r| r.temp_max_c);
    let total_rain: f64 = weather.iter().map(|o| o.value.rainfall_mm).sum();

    let mut candidates: Vec<WeatherAdjustment> = Vec::new();
    if mean_min.is_some_and(|t| t < COLD_SPELL_MEAN_MIN_C) {
        candidates.push(WeatherAdjustment {
            factor: COLD_SPELL_FACTOR,
            reason: "cold spell raises maintenance energy demand",
        });
    }
    if mean_max.is_some_and(|t| t > HEAT_MEAN_MAX_C) {
        candidates.push(WeatherAdjustment {
            factor: HEAT_FACTOR,
            reason: "hot conditions raise water and energy needs",
        });
    }
    if !weather.is_empty() && total_rain > SUSTAINED_RAIN_TOTAL_MM {
        candidates.push(WeatherAdjustment {
            factor: SUSTAINED_RAIN_FACTOR,
            reason: "sustained rain lowers grazing efficiency",
        });
    }

    candidates
        .into_iter()
        .max_by(|a, b| a.factor.total_cmp(&b.factor))
        .unwrap_or(WeatherAdjustment {
            factor: 1.0,
            reason: "no weather adjustment",
        })
}

/// Build the priced feed plan for one parcel and period.
pub fn build_feed_plan(
    parcel_id: Uuid,
    livestock: &LivestockCounts,
    period: DateRange,
    weather: &SignalSeries<WeatherReading>,
    cost_per_kg: Decimal,
    created_at: DateTime<Utc>,
) -> FeedPlan {
    let daily_base_demand_kg = baseline_daily_demand(livestock);
    let adjustment = weather_adjustment(weather);
    let daily_adjusted_demand_kg = daily_base_demand_kg * adjustment.factor;
    let total_feed_kg = daily_adjusted_demand_kg * period.days() as f64;
    let total_cost = Decimal::from_f64_retain(total_feed_kg).unwrap_or_default() * cost_per_kg;

    FeedPlan {
        id: Uuid::new_v4(),
        parcel_id,
        period,
        daily_base_demand_kg,
        adjustment_factor: adjustment.factor,
        adjustment_reason: adjustment.reason.to_string(),
        daily_adjusted_demand_kg,
        total_feed_kg,
        cost_per_kg,
        total_cost,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::Observation;
    use std::str::FromStr;

    fn weather_series(days: &[(f64, f64, f64)]) -> SignalSeries<WeatherReading> {
        let observations = days
            .iter()
            .enumerate()
            .map(|(i, &(temp_max_c, temp_min_c, rainfall_mm))| Observation {
                date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                value: WeatherReading {
                    temp_c: (temp_max_c + temp_min_c) / 2.0,
                    temp_max_c,
                    temp_min_c,
                    rainfall_mm,
                    humidity_percent: 60.0,
                    wind_speed_mps: 2.0,
                },
            })
            .collect();
        SignalSeries::from_observations(observations)
    }

    #[test]
    fn baseline_uses_per_head_rates() {
        let demand = baseline_daily_demand(&LivestockCounts {
            cattle: 10,
            sheep: 20,
            goats: 5,
        });
        assert!((demand - (250.0 + 50.0 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn cold_spell_wins_over_rain() {
        let series = weather_series(&[(5.0, -3.0, 60.0), (4.0, -4.0, 60.0)]);
        let adjustment = weather_adjustment(&series);
        assert_eq!(adjustment.factor, COLD_SPELL_FACTOR);
    }

    #[test]
    fn empty_weather_means_no_adjustment() {
        let adjustment = weather_adjustment(&SignalSeries::empty());
        assert_eq!(adjustment.factor, 1.0);
        assert_eq!(adjustment.reason, "no weather adjustment");
    }

    #[test]
    fn plan_projects_and_prices_the_period() {
        let period = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        );
        let plan = build_feed_plan(
            Uuid::new_v4(),
            &LivestockCounts {
                cattle: 4,
                sheep: 0,
                goats: 0,
            },
            period,
            &SignalSeries::empty(),
            Decimal::from_str("0.30").unwrap(),
            Utc::now(),
        );
        // 100 kg/day * 10 days = 1000 kg at 0.30/kg.
        assert_eq!(plan.daily_base_demand_kg, 100.0);
        assert_eq!(plan.total_feed_kg, 1_000.0);
        assert_eq!(plan.total_cost, Decimal::from_str("300.00").unwrap());
    }
}
