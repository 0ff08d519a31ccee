//! Assessment orchestration
//!
//! Ties the pipeline together: load the parcel, gather the three signals
//! concurrently, derive every indicator, run the predictions, score the
//! whole, persist the record and return it. A missing parcel is the only
//! fatal failure; everything downstream degrades and is reported through
//! provenance fields and the `heuristic` prediction tag.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{validation, Assessment, DateRange, FeedPlan, ImpactReport, ParcelProfile};

use crate::error::{AppError, AppResult};
use crate::services::prediction::ModelStore;
use crate::services::sources::SourceReaders;
use crate::services::{drought, feed, grazing, impact, scoring, stress, thermal};
use crate::store::{ParcelStore, ReportStore};

pub struct AssessmentService {
    parcels: Arc<dyn ParcelStore>,
    readers: SourceReaders,
    models: Arc<ModelStore>,
    reports: Arc<dyn ReportStore>,
    default_cost_per_kg: Decimal,
}

impl AssessmentService {
    pub fn new(
        parcels: Arc<dyn ParcelStore>,
        readers: SourceReaders,
        models: Arc<ModelStore>,
        reports: Arc<dyn ReportStore>,
        default_cost_per_kg: Decimal,
    ) -> Self {
        Self {
            parcels,
            readers,
            models,
            reports,
            default_cost_per_kg,
        }
    }

    fn validate_range(range: &DateRange) -> AppResult<()> {
        validation::validate_date_range(range).map_err(|message| AppError::Validation {
            field: "end_date".to_string(),
            message: message.to_string(),
        })
    }

    /// Load a parcel and reject corrupt stored profiles before they reach
    /// the pipeline.
    async fn load_parcel(&self, parcel_id: Uuid) -> AppResult<ParcelProfile> {
        let parcel = self.parcels.get(parcel_id).await?;
        validation::validate_parcel(&parcel)
            .map_err(|message| AppError::Internal(format!("stored parcel invalid: {}", message)))?;
        Ok(parcel)
    }

    /// Run a full assessment of one parcel over a period and persist it.
    pub async fn assess(&self, parcel_id: Uuid, range: DateRange) -> AppResult<Assessment> {
        Self::validate_range(&range)?;
        let parcel = self.load_parcel(parcel_id).await?;

        let signals = self.readers.gather(&parcel, &range).await;

        let stress = stress::analyze_stress(&signals.vegetation);
        let drought = drought::analyze_drought(&signals.soil_moisture);
        let heat = thermal::analyze_heat(&signals.weather);
        let cold = thermal::analyze_cold(&signals.weather);

        let prediction = self.models.predict(&signals, &parcel.livestock).await;

        let grazing = grazing::plan_grazing(
            &parcel,
            prediction.biomass_kg_per_ha.value,
            prediction.feed_demand_kg_per_day.value,
            stress.latest_index,
            range.end,
        );

        let score = scoring::overall_score(&stress, &drought, &heat, &cold);

        let assessment = Assessment {
            id: Uuid::new_v4(),
            parcel,
            period: range,
            stress,
            drought,
            heat,
            cold,
            grazing,
            prediction,
            score,
            sources: signals.provenance,
            created_at: Utc::now(),
        };

        self.reports.append_assessment(&assessment).await?;
        tracing::info!(
            parcel = %assessment.parcel.id,
            score = assessment.score,
            vegetation_source = %assessment.sources.vegetation,
            "assessment complete"
        );
        Ok(assessment)
    }

    /// Build and persist a feed plan. A failed weather fetch degrades to no
    /// adjustment rather than failing the plan.
    pub async fn generate_feed_plan(
        &self,
        parcel_id: Uuid,
        range: DateRange,
        cost_per_kg: Option<Decimal>,
    ) -> AppResult<FeedPlan> {
        Self::validate_range(&range)?;
        let parcel = self.load_parcel(parcel_id).await?;

        let weather = self.readers.gather_weather(&parcel, &range).await;
        let plan = feed::build_feed_plan(
            parcel.id,
            &parcel.livestock,
            range,
            &weather,
            cost_per_kg.unwrap_or(self.default_cost_per_kg),
            Utc::now(),
        );

        self.reports.append_feed_plan(&plan).await?;
        tracing::info!(parcel = %parcel.id, total_feed_kg = plan.total_feed_kg, "feed plan generated");
        Ok(plan)
    }

    /// Build and persist an environmental impact report. Needs no external
    /// signals, only the stored parcel profile.
    pub async fn calculate_impact(&self, parcel_id: Uuid) -> AppResult<ImpactReport> {
        let parcel = self.load_parcel(parcel_id).await?;
        let report = impact::build_impact_report(&parcel, Utc::now());
        self.reports.append_impact_report(&report).await?;
        tracing::info!(parcel = %parcel.id, rating = %report.rating, "impact report generated");
        Ok(report)
    }
}
