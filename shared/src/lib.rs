//! Shared types and models for the Pasture Management Platform
//!
//! This crate contains the data model shared between the backend service
//! and other components of the system: parcel profiles, signal series,
//! derived indicators and the persisted report records.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
