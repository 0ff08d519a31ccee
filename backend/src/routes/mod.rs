//! Route definitions for the Pasture Management Platform

use axum::{routing::post, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/parcels", parcel_routes())
}

/// Parcel decision-engine routes
fn parcel_routes() -> Router<AppState> {
    Router::new()
        .route("/:parcel_id/assessments", post(handlers::run_assessment))
        .route("/:parcel_id/feed-plan", post(handlers::generate_feed_plan))
        .route("/:parcel_id/impact-report", post(handlers::calculate_impact))
}
