//! Resolution selection and concurrent signal gathering
//!
//! The vegetation signal has two readers at different resolutions. Parcels
//! under 10 ha try the high-resolution reader first because the coarse
//! 250 m-equivalent grid would average across their boundaries; larger
//! parcels go straight to the coarse reader and never touch the
//! high-resolution service. The fallback direction is always high→coarse.
//!
//! All three independent signals are fetched concurrently. A reader failure
//! degrades that one signal to an empty series tagged `unavailable`; it
//! never aborts the other readers or the assessment.

use std::sync::Arc;

use shared::{
    DateRange, ParcelProfile, SignalProvenance, SignalSeries, SoilMoistureReading,
    VegetationReading, WeatherReading,
};

use crate::external::{SoilMoistureProvider, VegetationProvider, WeatherProvider};

/// Parcels below this area use the high-resolution vegetation reader first.
pub const SMALL_PARCEL_CUTOFF_HA: f64 = 10.0;

/// Provenance tag recorded when every reader for a signal failed.
pub const UNAVAILABLE_TAG: &str = "unavailable";

/// Vegetation reader kinds, in no particular order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VegetationSource {
    HighResolution,
    Coarse,
}

/// Ordered list of vegetation readers to attempt; first success wins.
pub fn vegetation_source_plan(area_ha: f64) -> Vec<VegetationSource> {
    if area_ha < SMALL_PARCEL_CUTOFF_HA {
        vec![VegetationSource::HighResolution, VegetationSource::Coarse]
    } else {
        vec![VegetationSource::Coarse]
    }
}

/// The three independent signal readers behind one handle
#[derive(Clone)]
pub struct SourceReaders {
    pub vegetation_high_res: Arc<dyn VegetationProvider>,
    pub vegetation_coarse: Arc<dyn VegetationProvider>,
    pub soil_moisture: Arc<dyn SoilMoistureProvider>,
    pub weather: Arc<dyn WeatherProvider>,
}

/// Joined reader results with per-signal provenance
#[derive(Debug, Clone)]
pub struct GatheredSignals {
    pub vegetation: SignalSeries<VegetationReading>,
    pub soil_moisture: SignalSeries<SoilMoistureReading>,
    pub weather: SignalSeries<WeatherReading>,
    pub provenance: SignalProvenance,
}

impl SourceReaders {
    /// Fetch all three signals concurrently, degrading each failure to an
    /// empty series.
    pub async fn gather(&self, parcel: &ParcelProfile, range: &DateRange) -> GatheredSignals {
        let point = parcel.boundary.centroid();

        let (vegetation, soil_moisture, weather) = tokio::join!(
            self.fetch_vegetation(parcel, range),
            self.fetch_soil_moisture(point.latitude, point.longitude, range),
            self.fetch_weather(point.latitude, point.longitude, range),
        );

        GatheredSignals {
            provenance: SignalProvenance {
                vegetation: vegetation.1,
                soil_moisture: soil_moisture.1,
                weather: weather.1,
            },
            vegetation: vegetation.0,
            soil_moisture: soil_moisture.0,
            weather: weather.0,
        }
    }

    /// Fetch only the weather signal, degrading a failure to an empty
    /// series. Used where the other signals are not needed.
    pub async fn gather_weather(
        &self,
        parcel: &ParcelProfile,
        range: &DateRange,
    ) -> SignalSeries<WeatherReading> {
        let point = parcel.boundary.centroid();
        self.fetch_weather(point.latitude, point.longitude, range)
            .await
            .0
    }

    async fn fetch_vegetation(
        &self,
        parcel: &ParcelProfile,
        range: &DateRange,
    ) -> (SignalSeries<VegetationReading>, String) {
        for source in vegetation_source_plan(parcel.area_ha) {
            let provider = match source {
                VegetationSource::HighResolution => &self.vegetation_high_res,
                VegetationSource::Coarse => &self.vegetation_coarse,
            };
            match provider.fetch(&parcel.boundary, range).await {
                Ok(series) => return (series, provider.source_tag().to_string()),
                Err(e) => {
                    tracing::warn!(
                        source = provider.source_tag(),
                        parcel = %parcel.id,
                        "vegetation reader failed: {}",
                        e
                    );
                }
            }
        }
        (SignalSeries::empty(), UNAVAILABLE_TAG.to_string())
    }

    async fn fetch_soil_moisture(
        &self,
        latitude: f64,
        longitude: f64,
        range: &DateRange,
    ) -> (SignalSeries<SoilMoistureReading>, String) {
        match self.soil_moisture.fetch(latitude, longitude, range).await {
            Ok(series) => (series, self.soil_moisture.source_tag().to_string()),
            Err(e) => {
                tracing::warn!(
                    source = self.soil_moisture.source_tag(),
                    "soil-moisture reader failed: {}",
                    e
                );
                (SignalSeries::empty(), UNAVAILABLE_TAG.to_string())
            }
        }
    }

    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
        range: &DateRange,
    ) -> (SignalSeries<WeatherReading>, String) {
        match self.weather.fetch(latitude, longitude, range).await {
            Ok(series) => (series, self.weather.source_tag().to_string()),
            Err(e) => {
                tracing::warn!(
                    source = self.weather.source_tag(),
                    "weather reader failed: {}",
                    e
                );
                (SignalSeries::empty(), UNAVAILABLE_TAG.to_string())
            }
        }
    }
}
