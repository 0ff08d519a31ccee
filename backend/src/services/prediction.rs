//! Prediction subsystem
//!
//! Two regression targets, biomass (kg/ha) and feed demand (kg/day), each
//! served by a stored linear model: a fixed, ordered feature list,
//! per-feature scaler constants for z-score normalization, weights and an
//! intercept. Artifacts are JSON files loaded once per process; the load
//! result (success or failure) is memoized so repeated assessments never
//! reload. Any model failure falls back to the target's heuristic and tags
//! the result, so callers can always tell `model` from `heuristic`
//! provenance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use shared::{
    LivestockCounts, PredictedValue, PredictionMethod, PredictionResult,
};

use super::feed::baseline_daily_demand;
use super::sources::GatheredSignals;
use super::stress::{heuristic_biomass, BIOMASS_CEILING_KG_PER_HA, BIOMASS_FLOOR_KG_PER_HA};

/// Feed demand never drops below this, kg/day.
pub const MIN_FEED_DEMAND_KG_PER_DAY: f64 = 10.0;

/// Ordered feature list for the biomass model.
pub const BIOMASS_FEATURES: [&str; 5] = [
    "vegetation_index_mean",
    "vegetation_index_latest",
    "soil_moisture_mean",
    "rainfall_total_mm",
    "temp_mean_c",
];

/// Ordered feature list for the feed-demand model.
pub const FEED_FEATURES: [&str; 5] = [
    "cattle_head",
    "sheep_head",
    "goat_head",
    "temp_mean_c",
    "vegetation_index_mean",
];

/// Named inputs to one inference; features a caller cannot supply are
/// simply absent and default to zero at inference time.
pub type FeatureVector = HashMap<&'static str, f64>;

/// Model load/inference failure. Recovered locally through the heuristic
/// path, never surfaced to callers of the pipeline.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("model artifact unreadable: {0}")]
    Load(String),

    #[error("model artifact malformed: {0}")]
    Malformed(String),
}

/// A stored linear regression artifact
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub features: Vec<String>,
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    fn validate(&self, expected_features: &[&str]) -> Result<(), ModelError> {
        let n = self.features.len();
        if self.means.len() != n || self.stds.len() != n || self.weights.len() != n {
            return Err(ModelError::Malformed(format!(
                "scaler/weight lengths do not match {} features",
                n
            )));
        }
        if self.features.iter().map(String::as_str).ne(expected_features.iter().copied()) {
            return Err(ModelError::Malformed(format!(
                "feature list mismatch: expected {:?}, got {:?}",
                expected_features, self.features
            )));
        }
        if self.stds.iter().any(|&s| s <= 0.0 || !s.is_finite()) {
            return Err(ModelError::Malformed(
                "scaler stds must be positive and finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalize each named feature and take the weighted sum. Missing
    /// inputs default to 0 rather than aborting.
    pub fn infer(&self, features: &FeatureVector) -> f64 {
        self.features
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let raw = features.get(name.as_str()).copied().unwrap_or(0.0);
                let normalized = (raw - self.means[i]) / self.stds[i];
                normalized * self.weights[i]
            })
            .sum::<f64>()
            + self.intercept
    }
}

/// The two loaded regression artifacts
#[derive(Debug, Clone)]
pub struct LoadedModels {
    pub biomass: LinearModel,
    pub feed_demand: LinearModel,
}

/// Process-wide model handle with load-once semantics. Concurrent callers
/// share one load; a failed load is memoized the same way so degraded
/// deployments do not hammer the filesystem on every assessment.
pub struct ModelStore {
    dir: PathBuf,
    models: OnceCell<Result<LoadedModels, ModelError>>,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            models: OnceCell::new(),
        }
    }

    async fn get(&self) -> Result<&LoadedModels, ModelError> {
        let loaded = self
            .models
            .get_or_init(|| async { Self::load(&self.dir).await })
            .await;
        match loaded {
            Ok(models) => Ok(models),
            Err(e) => Err(e.clone()),
        }
    }

    async fn load(dir: &Path) -> Result<LoadedModels, ModelError> {
        let biomass = Self::load_model(dir.join("biomass.json"), &BIOMASS_FEATURES).await?;
        let feed_demand = Self::load_model(dir.join("feed_demand.json"), &FEED_FEATURES).await?;
        tracing::info!(dir = %dir.display(), "prediction models loaded");
        Ok(LoadedModels {
            biomass,
            feed_demand,
        })
    }

    async fn load_model(path: PathBuf, expected_features: &[&str]) -> Result<LinearModel, ModelError> {
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        let model: LinearModel = serde_json::from_str(&raw)
            .map_err(|e| ModelError::Malformed(format!("{}: {}", path.display(), e)))?;
        model.validate(expected_features)?;
        Ok(model)
    }

    /// Predict standing biomass, falling back to the index-scaled
    /// heuristic when the model path is unavailable.
    pub async fn predict_biomass(
        &self,
        features: &FeatureVector,
        latest_index: Option<f64>,
    ) -> PredictedValue {
        match self.get().await {
            Ok(models) => PredictedValue {
                value: models
                    .biomass
                    .infer(features)
                    .clamp(BIOMASS_FLOOR_KG_PER_HA, BIOMASS_CEILING_KG_PER_HA),
                method: PredictionMethod::Model,
            },
            Err(e) => {
                tracing::warn!("biomass model unavailable, using heuristic: {}", e);
                PredictedValue {
                    value: heuristic_biomass(latest_index.unwrap_or(0.0)),
                    method: PredictionMethod::Heuristic,
                }
            }
        }
    }

    /// Predict daily feed demand, falling back to the per-head heuristic
    /// when the model path is unavailable.
    pub async fn predict_feed_demand(
        &self,
        features: &FeatureVector,
        livestock: &LivestockCounts,
    ) -> PredictedValue {
        match self.get().await {
            Ok(models) => PredictedValue {
                value: models
                    .feed_demand
                    .infer(features)
                    .max(MIN_FEED_DEMAND_KG_PER_DAY),
                method: PredictionMethod::Model,
            },
            Err(e) => {
                tracing::warn!("feed-demand model unavailable, using heuristic: {}", e);
                PredictedValue {
                    value: baseline_daily_demand(livestock).max(MIN_FEED_DEMAND_KG_PER_DAY),
                    method: PredictionMethod::Heuristic,
                }
            }
        }
    }

    /// Run both targets against the gathered signals.
    pub async fn predict(
        &self,
        signals: &GatheredSignals,
        livestock: &LivestockCounts,
    ) -> PredictionResult {
        let biomass_features = biomass_features(signals);
        let feed_features = feed_features(signals, livestock);
        let latest_index = signals.vegetation.latest().map(|v| v.index);

        PredictionResult {
            biomass_kg_per_ha: self.predict_biomass(&biomass_features, latest_index).await,
            feed_demand_kg_per_day: self.predict_feed_demand(&feed_features, livestock).await,
        }
    }
}

/// Assemble the biomass feature vector from the gathered signals. Signals
/// with no data contribute no entry; inference defaults them to zero.
pub fn biomass_features(signals: &GatheredSignals) -> FeatureVector {
    let mut features = FeatureVector::new();
    if let Some(mean) = signals.vegetation.mean_by(|v| v.index) {
        features.insert("vegetation_index_mean", mean);
    }
    if let Some(latest) = signals.vegetation.latest() {
        features.insert("vegetation_index_latest", latest.index);
    }
    if let Some(mean) = signals.soil_moisture.mean_by(|r| r.moisture_fraction) {
        features.insert("soil_moisture_mean", mean);
    }
    if !signals.weather.is_empty() {
        features.insert(
            "rainfall_total_mm",
            signals.weather.iter().map(|o| o.value.rainfall_mm).sum(),
        );
    }
    if let Some(mean) = signals.weather.mean_by(|r| r.temp_c) {
        features.insert("temp_mean_c", mean);
    }
    features
}

/// Assemble the feed-demand feature vector.
pub fn feed_features(signals: &GatheredSignals, livestock: &LivestockCounts) -> FeatureVector {
    let mut features = FeatureVector::new();
    features.insert("cattle_head", f64::from(livestock.cattle));
    features.insert("sheep_head", f64::from(livestock.sheep));
    features.insert("goat_head", f64::from(livestock.goats));
    if let Some(mean) = signals.weather.mean_by(|r| r.temp_c) {
        features.insert("temp_mean_c", mean);
    }
    if let Some(mean) = signals.vegetation.mean_by(|v| v.index) {
        features.insert("vegetation_index_mean", mean);
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_model(features: &[&str]) -> LinearModel {
        LinearModel {
            features: features.iter().map(|f| f.to_string()).collect(),
            means: vec![0.0; features.len()],
            stds: vec![1.0; features.len()],
            weights: vec![1.0; features.len()],
            intercept: 0.0,
        }
    }

    #[test]
    fn inference_normalizes_and_sums() {
        let model = LinearModel {
            features: vec!["a".to_string(), "b".to_string()],
            means: vec![10.0, 0.0],
            stds: vec![5.0, 2.0],
            weights: vec![3.0, 1.0],
            intercept: 7.0,
        };
        let mut features = FeatureVector::new();
        features.insert("a", 20.0);
        features.insert("b", 4.0);
        // (20-10)/5 * 3 + (4-0)/2 * 1 + 7 = 6 + 2 + 7
        assert!((model.infer(&features) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn missing_features_default_to_zero() {
        let model = identity_model(&["a", "b"]);
        let features = FeatureVector::new();
        // Both features absent: (0-0)/1 * 1 twice, plus intercept 0.
        assert_eq!(model.infer(&features), 0.0);
    }

    #[test]
    fn validation_rejects_shape_mismatches() {
        let mut model = identity_model(&BIOMASS_FEATURES);
        model.weights.pop();
        assert!(model.validate(&BIOMASS_FEATURES).is_err());

        let mut model = identity_model(&BIOMASS_FEATURES);
        model.stds[0] = 0.0;
        assert!(model.validate(&BIOMASS_FEATURES).is_err());

        let model = identity_model(&["wrong", "features", "here", "now", "ok"]);
        assert!(model.validate(&BIOMASS_FEATURES).is_err());
    }

    #[tokio::test]
    async fn missing_artifacts_fall_back_to_heuristics() {
        let store = ModelStore::new("does/not/exist");
        let biomass = store
            .predict_biomass(&FeatureVector::new(), Some(0.5))
            .await;
        assert_eq!(biomass.method, PredictionMethod::Heuristic);
        assert_eq!(biomass.value, 7_500.0);

        let livestock = LivestockCounts {
            cattle: 2,
            sheep: 0,
            goats: 0,
        };
        let feed = store
            .predict_feed_demand(&FeatureVector::new(), &livestock)
            .await;
        assert_eq!(feed.method, PredictionMethod::Heuristic);
        assert_eq!(feed.value, 50.0);
    }

    #[tokio::test]
    async fn heuristic_feed_demand_has_a_floor() {
        let store = ModelStore::new("does/not/exist");
        let feed = store
            .predict_feed_demand(&FeatureVector::new(), &LivestockCounts::default())
            .await;
        assert_eq!(feed.value, MIN_FEED_DEMAND_KG_PER_DAY);
    }
}
