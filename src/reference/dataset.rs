//! Fleet dataset loading and validation.
//!
//! A dataset is a single JSON document carrying the fleet, the cargo book
//! and the reference tables the calculator needs:
//!
//! ```json
//! {
//!   "vessels": [ ... ],
//!   "cargoes": [ ... ],
//!   "distances": [ { "from": "Kamsar", "to": "Qingdao", "distance": 11124 } ],
//!   "consumption": { "Ann Bell": { "ballast": { "vlsfo": 38, "mgo": 2 }, ... } },
//!   "bunker_prices": { "vlsfo": 490, "mgo": 650 },
//!   "bunker_hubs": [ { "port": "Singapore", "prices": { "vlsfo": 470, "mgo": 640 } } ],
//!   "port_features": { "Qingdao": { "vessel_queue": 41, "berth_utilization": 0.86 } }
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BunkerHub, ConsumptionProfile, PortDistanceTable, ReferenceTables, RouteDistance};
use crate::error::{Result, VoyageError};
use crate::models::{Cargo, FuelQuantities, Vessel};

/// Feature vectors keyed by port, then by feature name.
pub type PortFeatures = BTreeMap<String, BTreeMap<String, f64>>;

/// Everything loaded from a fleet dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetDataset {
    pub vessels: Vec<Vessel>,
    pub cargoes: Vec<Cargo>,
    #[serde(default)]
    pub distances: Vec<RouteDistance>,
    #[serde(default)]
    pub consumption: BTreeMap<String, ConsumptionProfile>,
    #[serde(default)]
    pub bunker_prices: Option<FuelQuantities>,
    #[serde(default)]
    pub bunker_hubs: Vec<BunkerHub>,
    #[serde(default)]
    pub port_features: PortFeatures,
}

impl FleetDataset {
    /// Reads and validates a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| VoyageError::Dataset {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let dataset = Self::from_json(&raw).map_err(|e| match e {
            VoyageError::Dataset { reason, .. } => VoyageError::Dataset {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;
        tracing::info!(
            path = %path.display(),
            vessels = dataset.vessels.len(),
            cargoes = dataset.cargoes.len(),
            routes = dataset.distances.len(),
            "fleet dataset loaded"
        );
        Ok(dataset)
    }

    /// Parses and validates a dataset from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let dataset: FleetDataset = serde_json::from_str(raw).map_err(|e| VoyageError::Dataset {
            path: "<inline>".into(),
            reason: e.to_string(),
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Checks identities are unique and every numeric field is usable.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for v in &self.vessels {
            if !seen.insert(v.name()) {
                return Err(VoyageError::validation("vessels", format!("duplicate vessel {}", v.name())));
            }
            let field = |name: &str| format!("vessels[{}].{name}", v.name());
            if !v.speeds().is_valid() {
                return Err(VoyageError::validation(field("speed"), "speeds must be positive"));
            }
            if !v.hire_rate().is_finite() || v.hire_rate() < 0.0 {
                return Err(VoyageError::validation(field("hire_rate"), "must be non-negative"));
            }
            if !v.bunkers_rob().is_valid() {
                return Err(VoyageError::validation(field("bunker_rob"), "must be non-negative"));
            }
        }

        let mut seen = HashSet::new();
        for c in &self.cargoes {
            if !seen.insert(c.name()) {
                return Err(VoyageError::validation("cargoes", format!("duplicate cargo {}", c.name())));
            }
            let field = |name: &str| format!("cargoes[{}].{name}", c.name());
            if !c.laycan().is_valid() {
                return Err(VoyageError::validation(field("laycan"), "laycan_start is after laycan_end"));
            }
            if c.quantity() == 0 {
                return Err(VoyageError::validation(field("quantity"), "must be positive"));
            }
            if !(c.load_rate() > 0.0 && c.discharge_rate() > 0.0) {
                return Err(VoyageError::validation(field("rates"), "load and discharge rates must be positive"));
            }
            if !(0.0..1.0).contains(&c.commission()) {
                return Err(VoyageError::validation(field("commission"), "must be in [0, 1)"));
            }
            if !(0.0..1.0).contains(&c.quantity_tolerance()) {
                return Err(VoyageError::validation(field("quantity_tolerance"), "must be in [0, 1)"));
            }
            if !c.freight_rate().is_finite() || c.freight_rate() < 0.0 {
                return Err(VoyageError::validation(field("freight_rate"), "must be non-negative"));
            }
            let port_costs = [c.port_cost_load(), c.port_cost_discharge()];
            if port_costs.iter().any(|cost| !cost.is_finite() || *cost < 0.0) {
                return Err(VoyageError::validation(field("port_costs"), "must be non-negative"));
            }
        }

        for r in &self.distances {
            if !r.distance.is_finite() || r.distance < 0.0 {
                return Err(VoyageError::validation(
                    "distances",
                    format!("{} -> {} has invalid distance {}", r.from, r.to, r.distance),
                ));
            }
        }
        for (vessel, profile) in &self.consumption {
            if !profile.is_valid() {
                return Err(VoyageError::validation(format!("consumption[{vessel}]"), "rates must be non-negative"));
            }
        }
        if let Some(prices) = &self.bunker_prices {
            if !prices.is_valid() {
                return Err(VoyageError::validation("bunker_prices", "must be non-negative"));
            }
        }
        for (port, features) in &self.port_features {
            if let Some((name, _)) = features.iter().find(|(_, value)| !value.is_finite()) {
                return Err(VoyageError::validation(
                    format!("port_features[{port}].{name}"),
                    "must be finite",
                ));
            }
        }
        for hub in &self.bunker_hubs {
            if !hub.prices.is_valid() {
                return Err(VoyageError::validation(format!("bunker_hubs[{}]", hub.port), "prices must be non-negative"));
            }
        }
        Ok(())
    }

    /// Builds the in-memory reference tables from this dataset.
    pub fn reference_tables(&self) -> ReferenceTables {
        let consumption: HashMap<String, ConsumptionProfile> = self
            .consumption
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        ReferenceTables::from_parts(
            PortDistanceTable::from_routes(&self.distances),
            consumption,
            self.bunker_prices,
            self.bunker_hubs.clone(),
        )
    }
}
