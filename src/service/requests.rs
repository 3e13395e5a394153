//! Request and response schemas of the service facade.
//!
//! Every request is validated into domain parameters before any
//! computation runs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageError};
use crate::models::{SpeedMode, VoyageParams, VoyageResult};

/// Upper bound on sweep points per scenario request.
pub const MAX_SCENARIO_STEPS: usize = 1_000;

/// Upper bound on the swept port delay, in days.
pub const MAX_SCENARIO_DELAY_DAYS: i64 = 365;

/// Upper bound on the extra port delay of a single voyage request, in days.
pub const MAX_EXTRA_PORT_DELAY_DAYS: f64 = 365.0;

fn default_true() -> bool {
    true
}

fn default_bunker_adjustment() -> f64 {
    1.0
}

/// Computes one vessel-cargo voyage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageCalcRequest {
    pub vessel_name: String,
    pub cargo_name: String,
    #[serde(default = "default_true")]
    pub use_eco_speed: bool,
    /// Extra waiting days at the load port.
    #[serde(default)]
    pub extra_port_delay: f64,
    /// Multiplier applied to bunker prices.
    #[serde(default = "default_bunker_adjustment")]
    pub bunker_adjustment: f64,
}

impl VoyageCalcRequest {
    /// A request at default parameters: eco speed, no delay, base prices.
    pub fn new(vessel_name: impl Into<String>, cargo_name: impl Into<String>) -> Self {
        Self {
            vessel_name: vessel_name.into(),
            cargo_name: cargo_name.into(),
            use_eco_speed: true,
            extra_port_delay: 0.0,
            bunker_adjustment: 1.0,
        }
    }

    /// Validated voyage parameters.
    pub fn params(&self) -> Result<VoyageParams> {
        if self.extra_port_delay > MAX_EXTRA_PORT_DELAY_DAYS {
            return Err(VoyageError::validation(
                "extra_port_delay",
                format!("must be at most {MAX_EXTRA_PORT_DELAY_DAYS} days"),
            ));
        }
        let params = VoyageParams::default()
            .with_speed_mode(SpeedMode::from_eco_flag(self.use_eco_speed))
            .with_extra_delay(self.extra_port_delay)
            .with_bunker_multiplier(self.bunker_adjustment);
        params.validate()?;
        Ok(params)
    }
}

/// Computes several voyages side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageCompareRequest {
    pub pairs: Vec<VoyageCalcRequest>,
}

/// Voyages in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageComparison {
    pub voyages: Vec<VoyageResult>,
}

fn default_parameter_min() -> f64 {
    0.8
}

fn default_parameter_max() -> f64 {
    1.5
}

fn default_steps() -> usize {
    15
}

/// Sweeps the bunker price multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    #[serde(default = "default_parameter_min")]
    pub parameter_min: f64,
    #[serde(default = "default_parameter_max")]
    pub parameter_max: f64,
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl Default for ScenarioRequest {
    fn default() -> Self {
        Self {
            parameter_min: default_parameter_min(),
            parameter_max: default_parameter_max(),
            steps: default_steps(),
        }
    }
}

impl ScenarioRequest {
    /// Checks the sweep size; range checks happen in the engine.
    pub fn validate(&self) -> Result<()> {
        if self.steps > MAX_SCENARIO_STEPS {
            return Err(VoyageError::validation(
                "steps",
                format!("must be at most {MAX_SCENARIO_STEPS}"),
            ));
        }
        Ok(())
    }
}

fn default_max_delay_days() -> i64 {
    15
}

/// Sweeps extra port delay in whole days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDelayScenarioRequest {
    #[serde(default = "default_max_delay_days")]
    pub max_delay_days: i64,
}

impl Default for PortDelayScenarioRequest {
    fn default() -> Self {
        Self {
            max_delay_days: default_max_delay_days(),
        }
    }
}

impl PortDelayScenarioRequest {
    /// The validated sweep length.
    pub fn max_delay(&self) -> Result<u32> {
        if !(0..=MAX_SCENARIO_DELAY_DAYS).contains(&self.max_delay_days) {
            return Err(VoyageError::validation(
                "max_delay_days",
                format!("must be between 0 and {MAX_SCENARIO_DELAY_DAYS}"),
            ));
        }
        u32::try_from(self.max_delay_days)
            .map_err(|_| VoyageError::validation("max_delay_days", "out of range"))
    }
}
