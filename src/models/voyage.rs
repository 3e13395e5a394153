//! Voyage parameters and the economics breakdown of a single voyage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FuelQuantities, SpeedMode};
use crate::error::{Result, VoyageError};

/// Scenario knobs applied to one voyage calculation.
///
/// # Examples
///
/// ```
/// use u_voyage::models::{SpeedMode, VoyageParams};
///
/// let p = VoyageParams::default().with_extra_delay(3.0).with_bunker_multiplier(1.2);
/// assert_eq!(p.speed_mode, SpeedMode::Eco);
/// assert!(p.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoyageParams {
    pub speed_mode: SpeedMode,
    /// Extra port delay in days added to the waiting time before loading.
    pub extra_delay: f64,
    /// Factor applied to every bunker price.
    pub bunker_multiplier: f64,
}

impl Default for VoyageParams {
    fn default() -> Self {
        Self {
            speed_mode: SpeedMode::Eco,
            extra_delay: 0.0,
            bunker_multiplier: 1.0,
        }
    }
}

impl VoyageParams {
    /// Sets the speed mode.
    pub fn with_speed_mode(mut self, mode: SpeedMode) -> Self {
        self.speed_mode = mode;
        self
    }

    /// Sets the extra port delay in days.
    pub fn with_extra_delay(mut self, days: f64) -> Self {
        self.extra_delay = days;
        self
    }

    /// Sets the bunker price multiplier.
    pub fn with_bunker_multiplier(mut self, multiplier: f64) -> Self {
        self.bunker_multiplier = multiplier;
        self
    }

    /// Checks `extra_delay >= 0` and `bunker_multiplier > 0`, both finite.
    pub fn validate(&self) -> Result<()> {
        if !self.extra_delay.is_finite() || self.extra_delay < 0.0 {
            return Err(VoyageError::validation(
                "extra_port_delay",
                format!("must be a non-negative number of days, got {}", self.extra_delay),
            ));
        }
        if !self.bunker_multiplier.is_finite() || self.bunker_multiplier <= 0.0 {
            return Err(VoyageError::validation(
                "bunker_adjustment",
                format!("must be positive, got {}", self.bunker_multiplier),
            ));
        }
        Ok(())
    }
}

/// Days spent in each phase of a voyage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DayBreakdown {
    pub ballast_days: f64,
    pub laden_days: f64,
    pub load_days: f64,
    pub discharge_days: f64,
    pub waiting_days: f64,
}

impl DayBreakdown {
    /// Sum of the five components.
    pub fn total(&self) -> f64 {
        self.ballast_days + self.laden_days + self.load_days + self.discharge_days + self.waiting_days
    }

    /// Days at sea (ballast + laden).
    pub fn sea_days(&self) -> f64 {
        self.ballast_days + self.laden_days
    }

    /// Days alongside cargo operations (load + discharge).
    pub fn working_days(&self) -> f64 {
        self.load_days + self.discharge_days
    }
}

/// Complete feasibility and economics breakdown of one vessel carrying one cargo.
///
/// Fields are laid out for direct serialization to the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageResult {
    pub vessel: String,
    pub cargo: String,
    pub speed_type: SpeedMode,
    pub can_make_laycan: bool,
    /// Effective arrival at the load port (after waiting and delay).
    pub arrival_date: NaiveDate,
    pub laycan_end: NaiveDate,
    /// `laycan_end - effective arrival` in days; negative when the laycan is missed.
    pub days_margin: f64,
    pub total_days: f64,
    #[serde(flatten)]
    pub days: DayBreakdown,
    pub cargo_qty: u32,
    pub gross_freight: f64,
    pub net_freight: f64,
    pub commission_cost: f64,
    pub total_bunker_cost: f64,
    pub bunker_cost_vlsfo: f64,
    pub bunker_cost_mgo: f64,
    pub hire_cost: f64,
    pub port_costs: f64,
    pub misc_costs: f64,
    pub net_profit: f64,
    /// Time-charter equivalent in $/day.
    pub tce: f64,
    pub vlsfo_consumed: f64,
    pub mgo_consumed: f64,
    /// Recommended intermediate bunkering hub, if one beats the base price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bunker_port: Option<String>,
    #[serde(default)]
    pub bunker_savings: f64,
}

impl VoyageResult {
    /// Fuel consumed over the whole voyage.
    pub fn consumption(&self) -> FuelQuantities {
        FuelQuantities::new(self.vlsfo_consumed, self.mgo_consumed)
    }

    /// `(vessel, cargo)` identity of this voyage.
    pub fn pair(&self) -> (&str, &str) {
        (&self.vessel, &self.cargo)
    }
}
