//! Port delay prediction.
//!
//! - [`DelayModel`] — Linear regression artifact over named port features
//! - [`PortDelayService`] — Point and interval estimates with congestion
//!   bands, plus model metadata

mod model;
mod service;

pub use model::{DelayModel, FeatureImportance, ModelInfo};
pub use service::{CongestionLevel, PortDelayPrediction, PortDelayService};
