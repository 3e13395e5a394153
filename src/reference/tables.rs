//! In-memory reference data.

use std::collections::HashMap;

use super::{BunkerHub, ConsumptionProfile, PortDistanceTable, ReferenceData};
use crate::models::FuelQuantities;

/// Reference data held in memory, usually built from a fleet dataset.
///
/// # Examples
///
/// ```
/// use u_voyage::models::FuelQuantities;
/// use u_voyage::reference::{ConsumptionProfile, ReferenceData, ReferenceTables};
///
/// let tables = ReferenceTables::new()
///     .with_distance("Kamsar", "Qingdao", 11_124.0)
///     .with_consumption("Ann Bell", ConsumptionProfile::default())
///     .with_base_prices(FuelQuantities::new(490.0, 650.0));
/// assert_eq!(tables.distance("Qingdao", "Kamsar"), Some(11_124.0));
/// assert!(tables.consumption("Ann Bell").is_some());
/// assert!(tables.consumption("Unknown").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    distances: PortDistanceTable,
    consumption: HashMap<String, ConsumptionProfile>,
    base_prices: Option<FuelQuantities>,
    hubs: Vec<BunkerHub>,
}

impl ReferenceTables {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates tables from pre-built parts.
    pub fn from_parts(
        distances: PortDistanceTable,
        consumption: HashMap<String, ConsumptionProfile>,
        base_prices: Option<FuelQuantities>,
        hubs: Vec<BunkerHub>,
    ) -> Self {
        Self {
            distances,
            consumption,
            base_prices,
            hubs,
        }
    }

    /// Adds a symmetric distance.
    pub fn with_distance(mut self, a: &str, b: &str, distance: f64) -> Self {
        self.distances.set_symmetric(a, b, distance);
        self
    }

    /// Adds a consumption profile for a vessel.
    pub fn with_consumption(mut self, vessel: impl Into<String>, profile: ConsumptionProfile) -> Self {
        self.consumption.insert(vessel.into(), profile);
        self
    }

    /// Sets the base bunker prices.
    pub fn with_base_prices(mut self, prices: FuelQuantities) -> Self {
        self.base_prices = Some(prices);
        self
    }

    /// Adds an intermediate bunkering hub.
    pub fn with_hub(mut self, hub: BunkerHub) -> Self {
        self.hubs.push(hub);
        self
    }

    /// The underlying distance table.
    pub fn distances(&self) -> &PortDistanceTable {
        &self.distances
    }
}

impl ReferenceData for ReferenceTables {
    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.distances.get(from, to)
    }

    fn consumption(&self, vessel: &str) -> Option<&ConsumptionProfile> {
        self.consumption.get(vessel)
    }

    fn base_prices(&self) -> Option<FuelQuantities> {
        self.base_prices
    }

    fn bunker_hubs(&self) -> &[BunkerHub] {
        &self.hubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tables() {
        let tables = ReferenceTables::new();
        assert_eq!(tables.distance("A", "B"), None);
        assert!(tables.base_prices().is_none());
        assert!(tables.bunker_hubs().is_empty());
    }

    #[test]
    fn test_hubs_in_insertion_order() {
        let tables = ReferenceTables::new()
            .with_hub(BunkerHub::new("Singapore", FuelQuantities::new(480.0, 640.0)))
            .with_hub(BunkerHub::new("Fujairah", FuelQuantities::new(470.0, 660.0)));
        let ports: Vec<&str> = tables.bunker_hubs().iter().map(|h| h.port.as_str()).collect();
        assert_eq!(ports, vec!["Singapore", "Fujairah"]);
    }
}
