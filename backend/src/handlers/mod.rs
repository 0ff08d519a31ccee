//! HTTP request handlers

pub mod assessment;

pub use assessment::{calculate_impact, generate_feed_plan, run_assessment};
