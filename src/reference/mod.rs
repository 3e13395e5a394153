//! Reference data: distances, consumption rates and bunker prices.
//!
//! The calculator only sees the [`ReferenceData`] trait; [`ReferenceTables`]
//! is the in-memory implementation built from a [`FleetDataset`].

mod dataset;
mod distance;
mod provider;
mod tables;

pub use dataset::{FleetDataset, PortFeatures};
pub use distance::{PortDistanceTable, RouteDistance};
pub use provider::{BunkerHub, ConsumptionProfile, ReferenceData};
pub use tables::ReferenceTables;
