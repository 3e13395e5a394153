//! Tipping points: where the optimal assignment set first changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AssignedPair, ScenarioEngine, ScenarioPoint};
use crate::error::{Result, VoyageError};
use crate::reference::ReferenceData;

/// The market parameter a tipping point refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioParameter {
    #[serde(rename = "Bunker Price")]
    BunkerPrice,
    #[serde(rename = "Port Delay")]
    PortDelay,
}

impl fmt::Display for ScenarioParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioParameter::BunkerPrice => f.write_str("Bunker Price"),
            ScenarioParameter::PortDelay => f.write_str("Port Delay"),
        }
    }
}

/// The first swept value at which the optimal portfolio stops being the
/// baseline one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TippingPoint {
    pub parameter: ScenarioParameter,
    /// Bunker multiplier or extra delay days at which the change occurs.
    pub value: f64,
    pub description: String,
    /// Total profit at the last swept value before the change.
    pub profit_before: f64,
    /// Total profit at the tipping value.
    pub profit_after: f64,
    /// Baseline optimal pairs.
    pub current_best_assignments: Vec<AssignedPair>,
    /// Optimal pairs at the tipping value.
    pub next_best_assignments: Vec<AssignedPair>,
}

fn describe(parameter: ScenarioParameter, value: f64) -> String {
    match parameter {
        ScenarioParameter::BunkerPrice => format!(
            "Optimal assignments change once bunker prices reach {:.0}% of current levels",
            value * 100.0
        ),
        ScenarioParameter::PortDelay => format!(
            "Optimal assignments change once port delays reach {value} extra days"
        ),
    }
}

/// Scans `points` (baseline first) for the first assignment change.
pub(crate) fn find_tipping_point(parameter: ScenarioParameter, points: &[ScenarioPoint]) -> Option<TippingPoint> {
    let baseline = points.first()?;
    points.windows(2).find_map(|w| {
        let (before, at) = (&w[0], &w[1]);
        if at.assignments == baseline.assignments {
            return None;
        }
        Some(TippingPoint {
            parameter,
            value: at.parameter_value,
            description: describe(parameter, at.parameter_value),
            profit_before: before.total_profit,
            profit_after: at.total_profit,
            current_best_assignments: baseline.assignments.clone(),
            next_best_assignments: at.assignments.clone(),
        })
    })
}

impl<R: ReferenceData + ?Sized> ScenarioEngine<'_, R> {
    /// Searches bunker multipliers from current prices (1.0) up to `max`.
    ///
    /// Returns `None` when the optimal assignments never change in range.
    pub fn bunker_tipping_point(&self, max: f64, steps: usize) -> Result<Option<TippingPoint>> {
        if steps < 2 {
            return Err(VoyageError::validation("steps", "a tipping search needs at least 2 steps"));
        }
        let points = self.bunker_sweep(1.0, max, steps)?;
        Ok(find_tipping_point(ScenarioParameter::BunkerPrice, &points))
    }

    /// Searches whole days of extra port delay from zero up to
    /// `max_delay_days`.
    pub fn delay_tipping_point(&self, max_delay_days: u32) -> Result<Option<TippingPoint>> {
        let sweep = self.port_delay_sweep(max_delay_days)?;
        Ok(find_tipping_point(ScenarioParameter::PortDelay, &sweep.points))
    }
}
