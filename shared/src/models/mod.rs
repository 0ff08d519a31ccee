//! Data models for the Pasture Management Platform

pub mod assessment;
pub mod feed;
pub mod impact;
pub mod parcel;
pub mod signal;

pub use assessment::*;
pub use feed::*;
pub use impact::*;
pub use parcel::*;
pub use signal::*;
