//! Assessment, feed-plan and impact-report endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::{Assessment, DateRange, FeedPlan, ImpactReport};

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedPlanQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost_per_kg: Option<Decimal>,
}

/// POST /api/v1/parcels/:parcel_id/assessments
pub async fn run_assessment(
    State(state): State<AppState>,
    Path(parcel_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Assessment>> {
    let assessment = state.assessments.assess(parcel_id, query.range()).await?;
    Ok(Json(assessment))
}

/// POST /api/v1/parcels/:parcel_id/feed-plan
pub async fn generate_feed_plan(
    State(state): State<AppState>,
    Path(parcel_id): Path<Uuid>,
    Query(query): Query<FeedPlanQuery>,
) -> AppResult<Json<FeedPlan>> {
    let range = DateRange::new(query.start_date, query.end_date);
    let plan = state
        .assessments
        .generate_feed_plan(parcel_id, range, query.cost_per_kg)
        .await?;
    Ok(Json(plan))
}

/// POST /api/v1/parcels/:parcel_id/impact-report
pub async fn calculate_impact(
    State(state): State<AppState>,
    Path(parcel_id): Path<Uuid>,
) -> AppResult<Json<ImpactReport>> {
    let report = state.assessments.calculate_impact(parcel_id).await?;
    Ok(Json(report))
}
