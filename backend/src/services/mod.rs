//! Decision-engine services

pub mod assessment;
pub mod drought;
pub mod feed;
pub mod grazing;
pub mod impact;
pub mod prediction;
pub mod scoring;
pub mod sources;
pub mod stress;
pub mod thermal;

pub use assessment::AssessmentService;
pub use prediction::ModelStore;
pub use sources::{GatheredSignals, SourceReaders};
