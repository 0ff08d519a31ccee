//! Persistence layer
//!
//! Parcels and generated reports live as JSONB documents in Postgres.
//! Reports are append-only; a new run inserts a new row and the latest
//! `created_at` wins. The traits keep the services testable with in-memory
//! stores.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shared::{Assessment, FeedPlan, ImpactReport, ParcelProfile};

use crate::error::{AppError, AppResult};

#[async_trait]
pub trait ParcelStore: Send + Sync {
    async fn get(&self, parcel_id: Uuid) -> AppResult<ParcelProfile>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn append_assessment(&self, assessment: &Assessment) -> AppResult<()>;
    async fn append_feed_plan(&self, plan: &FeedPlan) -> AppResult<()>;
    async fn append_impact_report(&self, report: &ImpactReport) -> AppResult<()>;
}

pub struct PgParcelStore {
    pool: PgPool,
}

impl PgParcelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParcelStore for PgParcelStore {
    async fn get(&self, parcel_id: Uuid) -> AppResult<ParcelProfile> {
        let row = sqlx::query("SELECT profile FROM parcels WHERE id = $1")
            .bind(parcel_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let profile: serde_json::Value = row.try_get("profile")?;
                serde_json::from_value(profile)
                    .map_err(|e| AppError::Internal(format!("stored parcel unreadable: {}", e)))
            }
            None => Err(AppError::NotFound("Parcel".to_string())),
        }
    }
}

pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn append_assessment(&self, assessment: &Assessment) -> AppResult<()> {
        let document = serde_json::to_value(assessment)
            .map_err(|e| AppError::Internal(format!("assessment not serializable: {}", e)))?;
        sqlx::query(
            "INSERT INTO assessments (id, parcel_id, period_start, period_end, document)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(assessment.id)
        .bind(assessment.parcel.id)
        .bind(assessment.period.start)
        .bind(assessment.period.end)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn append_feed_plan(&self, plan: &FeedPlan) -> AppResult<()> {
        let document = serde_json::to_value(plan)
            .map_err(|e| AppError::Internal(format!("feed plan not serializable: {}", e)))?;
        sqlx::query(
            "INSERT INTO feed_plans (id, parcel_id, period_start, period_end, document)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(plan.id)
        .bind(plan.parcel_id)
        .bind(plan.period.start)
        .bind(plan.period.end)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn append_impact_report(&self, report: &ImpactReport) -> AppResult<()> {
        let document = serde_json::to_value(report)
            .map_err(|e| AppError::Internal(format!("impact report not serializable: {}", e)))?;
        sqlx::query("INSERT INTO impact_reports (id, parcel_id, document) VALUES ($1, $2, $3)")
            .bind(report.id)
            .bind(report.parcel_id)
            .bind(document)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
