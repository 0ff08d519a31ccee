//! Grazing rotation planning

use chrono::{Duration, NaiveDate};

use shared::{GrazingPlan, ParcelProfile};

/// Share of standing biomass that can be grazed without harming regrowth.
pub const UTILIZATION_FACTOR: f64 = 0.5;

/// Rest-period baseline in days, halved when the sward is in good shape.
pub const BASE_REST_DAYS: f64 = 28.0;

/// Rest periods never drop below this.
pub const MIN_REST_DAYS: u32 = 21;

/// Vegetation index above which the sward counts as in good condition.
pub const GOOD_CONDITION_INDEX: f64 = 0.6;

/// Horizon for the next rotation date. Only the date is capped; the
/// grazing-day count always reports the feed-budget formula value.
pub const MAX_ROTATION_HORIZON_DAYS: u32 = 365;

/// Build the rotation plan from standing biomass and daily feed demand.
/// `as_of` anchors the next rotation date, keeping the plan deterministic
/// for a fixed assessment window.
pub fn plan_grazing(
    parcel: &ParcelProfile,
    biomass_kg_per_ha: f64,
    daily_feed_demand_kg: f64,
    vegetation_index: Option<f64>,
    as_of: NaiveDate,
) -> GrazingPlan {
    let available_feed_kg = biomass_kg_per_ha * parcel.area_ha;
    let usable_feed_kg = available_feed_kg * UTILIZATION_FACTOR;

    // Zero demand means the feed never runs out.
    let grazing_days = if daily_feed_demand_kg > 0.0 {
        (usable_feed_kg / daily_feed_demand_kg).floor() as u32
    } else {
        u32::MAX
    };

    let in_good_condition = vegetation_index.is_some_and(|index| index > GOOD_CONDITION_INDEX);
    let divisor = if in_good_condition { 1.0 } else { 2.0 };
    let recommended_rest_days = ((BASE_REST_DAYS / divisor).ceil() as u32).max(MIN_REST_DAYS);

    let stocking_rate = if parcel.area_ha > 0.0 {
        parcel.livestock.cattle_units() / parcel.area_ha
    } else {
        0.0
    };

    GrazingPlan {
        available_feed_kg,
        usable_feed_kg,
        grazing_days,
        recommended_rest_days,
        next_rotation: as_of
            + Duration::days(i64::from(grazing_days.min(MAX_ROTATION_HORIZON_DAYS))),
        stocking_rate,
    }
}
