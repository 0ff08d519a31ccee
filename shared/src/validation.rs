//! Validation utilities for the Pasture Management Platform

use crate::models::ParcelProfile;
use crate::types::{Boundary, DateRange, GpsCoordinates};

/// Validate that a coordinate pair is on the globe
pub fn validate_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&coords.latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&coords.longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a parcel boundary
pub fn validate_boundary(boundary: &Boundary) -> Result<(), &'static str> {
    match boundary {
        Boundary::Point(point) => validate_coordinates(point),
        Boundary::Polygon(vertices) => {
            if vertices.len() < 3 {
                return Err("Polygon boundary needs at least 3 vertices");
            }
            for vertex in vertices {
                validate_coordinates(vertex)?;
            }
            Ok(())
        }
    }
}

/// Validate a parcel profile before it enters the pipeline
pub fn validate_parcel(parcel: &ParcelProfile) -> Result<(), &'static str> {
    if parcel.name.trim().is_empty() {
        return Err("Parcel name cannot be empty");
    }
    if !parcel.area_ha.is_finite() || parcel.area_ha <= 0.0 {
        return Err("Parcel area must be a positive number of hectares");
    }
    validate_boundary(&parcel.boundary)
}

/// Validate that a date range runs forward
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.start > range.end {
        return Err("Date range start must not be after its end");
    }
    Ok(())
}
