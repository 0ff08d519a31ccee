//! Feed plan record

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DateRange;

/// Persisted feed plan for a parcel and period.
///
/// Independent lifecycle from the assessment: a feed plan may be recomputed
/// without recomputing the assessment for the same window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPlan {
    pub id: Uuid,
    pub parcel_id: Uuid,
    pub period: DateRange,
    /// Dry-matter demand from per-head rates before weather adjustment
    pub daily_base_demand_kg: f64,
    pub adjustment_factor: f64,
    pub adjustment_reason: String,
    pub daily_adjusted_demand_kg: f64,
    pub total_feed_kg: f64,
    pub cost_per_kg: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}
