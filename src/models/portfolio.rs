//! Assignment and portfolio result types.

use serde::{Deserialize, Serialize};

use super::VoyageResult;

/// A vessel matched to a cargo, with the economics backing the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub vessel: String,
    pub cargo: String,
    pub voyage: VoyageResult,
}

impl Assignment {
    /// Creates an assignment from a computed voyage.
    pub fn new(voyage: VoyageResult) -> Self {
        Self {
            vessel: voyage.vessel.clone(),
            cargo: voyage.cargo.clone(),
            voyage,
        }
    }
}

/// The optimal set of vessel-cargo assignments for a fleet.
///
/// Each vessel and each cargo appears in at most one assignment.
///
/// # Examples
///
/// ```
/// use u_voyage::models::PortfolioResult;
///
/// let empty = PortfolioResult::from_assignments(vec![], vec!["Ann Bell".into()], vec![]);
/// assert_eq!(empty.num_assignments(), 0);
/// assert_eq!(empty.avg_tce, 0.0);
/// assert_eq!(empty.unassigned_vessels, vec!["Ann Bell".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioResult {
    pub assignments: Vec<Assignment>,
    pub unassigned_vessels: Vec<String>,
    pub unassigned_cargoes: Vec<String>,
    pub total_profit: f64,
    pub total_tce: f64,
    pub avg_tce: f64,
}

impl PortfolioResult {
    /// Builds a result and computes the aggregate totals.
    pub fn from_assignments(
        assignments: Vec<Assignment>,
        unassigned_vessels: Vec<String>,
        unassigned_cargoes: Vec<String>,
    ) -> Self {
        let total_profit = assignments.iter().map(|a| a.voyage.net_profit).sum();
        let total_tce: f64 = assignments.iter().map(|a| a.voyage.tce).sum();
        let avg_tce = if assignments.is_empty() {
            0.0
        } else {
            total_tce / assignments.len() as f64
        };
        Self {
            assignments,
            unassigned_vessels,
            unassigned_cargoes,
            total_profit,
            total_tce,
            avg_tce,
        }
    }

    /// Number of assignments.
    pub fn num_assignments(&self) -> usize {
        self.assignments.len()
    }

    /// `(vessel, cargo)` names of every assignment, in assignment order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.assignments
            .iter()
            .map(|a| (a.vessel.clone(), a.cargo.clone()))
            .collect()
    }

    /// The assignment carrying the given cargo, if any.
    pub fn assignment_for_cargo(&self, cargo: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.cargo == cargo)
    }

    /// The assignment using the given vessel, if any.
    pub fn assignment_for_vessel(&self, vessel: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.vessel == vessel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayBreakdown, SpeedMode};
    use chrono::NaiveDate;

    fn voyage(vessel: &str, cargo: &str, profit: f64, tce: f64) -> VoyageResult {
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid");
        VoyageResult {
            vessel: vessel.into(),
            cargo: cargo.into(),
            speed_type: SpeedMode::Eco,
            can_make_laycan: true,
            arrival_date: date,
            laycan_end: date,
            days_margin: 0.0,
            total_days: 30.0,
            days: DayBreakdown::default(),
            cargo_qty: 0,
            gross_freight: 0.0,
            net_freight: 0.0,
            commission_cost: 0.0,
            total_bunker_cost: 0.0,
            bunker_cost_vlsfo: 0.0,
            bunker_cost_mgo: 0.0,
            hire_cost: 0.0,
            port_costs: 0.0,
            misc_costs: 0.0,
            net_profit: profit,
            tce,
            vlsfo_consumed: 0.0,
            mgo_consumed: 0.0,
            bunker_port: None,
            bunker_savings: 0.0,
        }
    }

    #[test]
    fn test_totals() {
        let result = PortfolioResult::from_assignments(
            vec![
                Assignment::new(voyage("A", "X", 100.0, 20.0)),
                Assignment::new(voyage("B", "Y", 50.0, 10.0)),
            ],
            vec![],
            vec!["Z".into()],
        );
        assert_eq!(result.num_assignments(), 2);
        assert!((result.total_profit - 150.0).abs() < 1e-12);
        assert!((result.total_tce - 30.0).abs() < 1e-12);
        assert!((result.avg_tce - 15.0).abs() < 1e-12);
        assert_eq!(result.unassigned_cargoes, vec!["Z".to_string()]);
    }

    #[test]
    fn test_lookup() {
        let result = PortfolioResult::from_assignments(
            vec![Assignment::new(voyage("A", "X", 100.0, 20.0))],
            vec![],
            vec![],
        );
        assert_eq!(result.assignment_for_cargo("X").map(|a| a.vessel.as_str()), Some("A"));
        assert_eq!(result.assignment_for_vessel("A").map(|a| a.cargo.as_str()), Some("X"));
        assert!(result.assignment_for_cargo("Y").is_none());
        assert_eq!(result.pairs(), vec![("A".to_string(), "X".to_string())]);
    }

    #[test]
    fn test_default_is_empty() {
        let result = PortfolioResult::default();
        assert_eq!(result.num_assignments(), 0);
        assert_eq!(result.total_profit, 0.0);
    }
}
