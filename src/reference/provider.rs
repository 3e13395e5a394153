//! Reference data provider trait.

use serde::{Deserialize, Serialize};

use crate::models::{FuelQuantities, Leg, SpeedMode};

/// Daily fuel burn of one vessel, per phase and speed mode, in tonnes/day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsumptionProfile {
    pub ballast: FuelQuantities,
    pub ballast_eco: FuelQuantities,
    pub laden: FuelQuantities,
    pub laden_eco: FuelQuantities,
    /// Burn while loading or discharging.
    #[serde(default)]
    pub port_working: FuelQuantities,
    /// Burn while waiting for the laycan or delayed in port.
    #[serde(default)]
    pub port_idle: FuelQuantities,
}

impl ConsumptionProfile {
    /// Burn rate at sea for the given leg and speed mode.
    pub fn sea_rate(&self, leg: Leg, mode: SpeedMode) -> FuelQuantities {
        match (leg, mode) {
            (Leg::Ballast, SpeedMode::Normal) => self.ballast,
            (Leg::Ballast, SpeedMode::Eco) => self.ballast_eco,
            (Leg::Laden, SpeedMode::Normal) => self.laden,
            (Leg::Laden, SpeedMode::Eco) => self.laden_eco,
        }
    }

    /// Returns `true` if every rate is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [
            self.ballast,
            self.ballast_eco,
            self.laden,
            self.laden_eco,
            self.port_working,
            self.port_idle,
        ]
        .iter()
        .all(FuelQuantities::is_valid)
    }
}

/// A port where bunkers can be bought at a known price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BunkerHub {
    pub port: String,
    /// Price in $/tonne per fuel type.
    pub prices: FuelQuantities,
}

impl BunkerHub {
    /// Creates a hub with the given prices.
    pub fn new(port: impl Into<String>, prices: FuelQuantities) -> Self {
        Self {
            port: port.into(),
            prices,
        }
    }
}

/// Supplies the distances, consumption rates and bunker prices the voyage
/// calculator consumes.
///
/// Every lookup returns `None` when the data is missing; the calculator
/// surfaces that as [`VoyageError::DataUnavailable`](crate::error::VoyageError)
/// rather than defaulting.
///
/// # Examples
///
/// ```
/// use u_voyage::models::FuelQuantities;
/// use u_voyage::reference::{ConsumptionProfile, ReferenceData};
///
/// struct Flat;
///
/// impl ReferenceData for Flat {
///     fn distance(&self, from: &str, to: &str) -> Option<f64> {
///         Some(if from == to { 0.0 } else { 1_000.0 })
///     }
///     fn consumption(&self, _vessel: &str) -> Option<&ConsumptionProfile> {
///         None
///     }
///     fn base_prices(&self) -> Option<FuelQuantities> {
///         Some(FuelQuantities::new(490.0, 650.0))
///     }
/// }
///
/// assert_eq!(Flat.distance("Qingdao", "Qingdao"), Some(0.0));
/// assert!(Flat.bunker_hubs().is_empty());
/// ```
pub trait ReferenceData: Send + Sync {
    /// Sea distance in nautical miles between two ports.
    fn distance(&self, from: &str, to: &str) -> Option<f64>;

    /// Consumption profile of the named vessel.
    fn consumption(&self, vessel: &str) -> Option<&ConsumptionProfile>;

    /// Base bunker price in $/tonne per fuel type.
    fn base_prices(&self) -> Option<FuelQuantities>;

    /// Ports offering intermediate bunkering.
    ///
    /// Defaults to none.
    fn bunker_hubs(&self) -> &[BunkerHub] {
        &[]
    }
}
