//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geographic extent of a parcel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "coordinates")]
pub enum Boundary {
    /// A single reference point
    Point(GpsCoordinates),
    /// A closed ring of vertices
    Polygon(Vec<GpsCoordinates>),
}

impl Boundary {
    /// Representative point for the extent, used when a provider takes a
    /// single lat/lon pair. An empty polygon yields the origin; validation
    /// rejects empty polygons before they reach the pipeline.
    pub fn centroid(&self) -> GpsCoordinates {
        match self {
            Boundary::Point(point) => *point,
            Boundary::Polygon(vertices) => {
                if vertices.is_empty() {
                    return GpsCoordinates::new(0.0, 0.0);
                }
                let n = vertices.len() as f64;
                GpsCoordinates::new(
                    vertices.iter().map(|v| v.latitude).sum::<f64>() / n,
                    vertices.iter().map(|v| v.longitude).sum::<f64>() / n,
                )
            }
        }
    }
}

/// Date range for queries and assessments
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl DateRange {
    pub fn new(start: chrono::NaiveDate, end: chrono::NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered, inclusive of both endpoints. Never below 1.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }
}

/// Livestock species tracked on a parcel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Cattle,
    Sheep,
    Goat,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Species::Cattle => write!(f, "cattle"),
            Species::Sheep => write!(f, "sheep"),
            Species::Goat => write!(f, "goat"),
        }
    }
}
