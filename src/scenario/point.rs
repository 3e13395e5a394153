//! Sweep result types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{PortfolioResult, VoyageResult};

/// A vessel-cargo pairing, without its economics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignedPair {
    pub vessel: String,
    pub cargo: String,
}

impl AssignedPair {
    pub fn new(vessel: impl Into<String>, cargo: impl Into<String>) -> Self {
        Self {
            vessel: vessel.into(),
            cargo: cargo.into(),
        }
    }
}

impl fmt::Display for AssignedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.vessel, self.cargo)
    }
}

/// The optimal portfolio at one value of a swept parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    /// Bunker multiplier or extra delay days, depending on the sweep.
    pub parameter_value: f64,
    pub total_profit: f64,
    pub total_tce: f64,
    pub avg_tce: f64,
    pub num_assignments: usize,
    /// Chosen pairs, ordered by vessel name.
    pub assignments: Vec<AssignedPair>,
}

impl ScenarioPoint {
    /// Summarizes `portfolio` as the sweep point for `parameter_value`.
    pub fn from_portfolio(parameter_value: f64, portfolio: &PortfolioResult) -> Self {
        Self {
            parameter_value,
            total_profit: portfolio.total_profit,
            total_tce: portfolio.total_tce,
            avg_tce: portfolio.avg_tce,
            num_assignments: portfolio.num_assignments(),
            assignments: portfolio
                .assignments
                .iter()
                .map(|a| AssignedPair::new(a.vessel.as_str(), a.cargo.as_str()))
                .collect(),
        }
    }
}

/// One pair's voyage at one value of a swept parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairPoint {
    pub parameter_value: f64,
    pub voyage: VoyageResult,
}

/// When extra port delay makes a pair miss its laycan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairThreshold {
    pub vessel: String,
    pub cargo: String,
    /// Smallest swept delay at which the pair is no longer feasible. Absent
    /// when the pair stays feasible throughout or is infeasible even
    /// without delay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_delay_days: Option<f64>,
}

/// Result of a port delay sweep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DelaySweep {
    /// One point per whole day of delay, starting at zero.
    pub points: Vec<ScenarioPoint>,
    /// Feasibility thresholds for every pair with complete reference data,
    /// ordered by vessel then cargo.
    pub thresholds: Vec<PairThreshold>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_empty_portfolio() {
        let point = ScenarioPoint::from_portfolio(1.2, &PortfolioResult::default());
        assert_eq!(point.parameter_value, 1.2);
        assert_eq!(point.num_assignments, 0);
        assert!(point.assignments.is_empty());
    }

    #[test]
    fn test_threshold_omits_absent_flip() {
        let t = PairThreshold {
            vessel: "Ann Bell".into(),
            cargo: "EGA Bauxite".into(),
            flip_delay_days: None,
        };
        let json = serde_json::to_string(&t).expect("serializes");
        assert!(!json.contains("flip_delay_days"));
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(AssignedPair::new("A", "B").to_string(), "A -> B");
    }
}
