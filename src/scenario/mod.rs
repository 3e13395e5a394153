//! Scenario sensitivity analysis.
//!
//! - [`ScenarioEngine`] — Bunker price and port delay sweeps over the fleet
//! - [`TippingPoint`] — First parameter value that changes the optimal
//!   assignments
//! - [`ScenarioPoint`], [`DelaySweep`] — Sweep results

mod engine;
mod point;
mod tipping;

pub use engine::ScenarioEngine;
pub use point::{AssignedPair, DelaySweep, PairPoint, PairThreshold, ScenarioPoint};
pub use tipping::{ScenarioParameter, TippingPoint};
