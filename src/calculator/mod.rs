//! Voyage economics: timing, laycan feasibility, fuel, revenue and cost lines.
//!
//! - [`VoyageCalculator`] — computes a [`VoyageResult`](crate::models::VoyageResult) for one vessel-cargo pair
//! - [`recommend_bunkering`] — cheaper intermediate bunkering for a fuel shortfall

mod bunkering;
mod voyage;

pub use bunkering::{recommend_bunkering, BunkerRecommendation};
pub use voyage::VoyageCalculator;
