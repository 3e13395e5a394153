//! Fleet-wide vessel-cargo assignment.
//!
//! Every (vessel, cargo) pair is priced by the [`VoyageCalculator`]; pairs
//! that miss the laycan or lack reference data are excluded, the rest are
//! weighted by net profit and matched exactly with [`max_weight_matching`].
//!
//! Vessels and cargoes are sorted by name before the matrix is built, so the
//! result does not depend on input order and ties between equally
//! profitable matchings always resolve the same way.

use super::{max_weight_matching, WeightMatrix};
use crate::calculator::VoyageCalculator;
use crate::error::Result;
use crate::models::{Assignment, Cargo, PortfolioResult, Vessel, VoyageParams, VoyageResult};
use crate::reference::ReferenceData;

/// Every pair's voyage, rows = vessels and columns = cargoes, both sorted.
struct VoyageGrid<'v> {
    vessels: Vec<&'v Vessel>,
    cargoes: Vec<&'v Cargo>,
    cells: Vec<Option<VoyageResult>>,
}

impl<'v> VoyageGrid<'v> {
    fn cell(&self, row: usize, col: usize) -> Option<&VoyageResult> {
        self.cells[row * self.cargoes.len() + col].as_ref()
    }

    fn weights(&self) -> WeightMatrix {
        let mut weights = WeightMatrix::new(self.vessels.len(), self.cargoes.len());
        for row in 0..self.vessels.len() {
            for col in 0..self.cargoes.len() {
                let weight = self
                    .cell(row, col)
                    .filter(|v| v.can_make_laycan)
                    .map(|v| v.net_profit);
                weights.set(row, col, weight);
            }
        }
        weights
    }
}

fn sorted_by_name<'v, T>(items: &'v [T], name: impl Fn(&T) -> &str) -> Vec<&'v T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| name(a).cmp(name(b)));
    sorted
}

/// Builds the profit-maximizing portfolio for a fleet.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_voyage::calculator::VoyageCalculator;
/// use u_voyage::models::{Cargo, FuelQuantities, Laycan, SpeedProfile, Vessel};
/// use u_voyage::optimizer::PortfolioOptimizer;
/// use u_voyage::reference::{ConsumptionProfile, ReferenceTables};
/// use u_voyage::settings::CostSettings;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let speeds = SpeedProfile::new(14.0, 12.0, 14.0, 12.0);
/// let vessels = vec![Vessel::new("Ann Bell", 180_000, 12_000.0, speeds, "Kamsar", d(1))];
/// let cargoes = vec![Cargo::new("EGA Bauxite", "Kamsar", "Qingdao", 70_000, 25.0)
///     .with_laycan(Laycan::new(d(5), d(20)).unwrap())
///     .with_rates(10_000.0, 8_000.0)];
/// let tables = ReferenceTables::new()
///     .with_distance("Kamsar", "Qingdao", 11_000.0)
///     .with_consumption("Ann Bell", ConsumptionProfile::default())
///     .with_base_prices(FuelQuantities::new(490.0, 650.0));
///
/// let optimizer = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
/// let portfolio = optimizer.optimize(&vessels, &cargoes);
/// assert_eq!(portfolio.pairs(), vec![("Ann Bell".to_string(), "EGA Bauxite".to_string())]);
/// ```
pub struct PortfolioOptimizer<'a, R: ReferenceData + ?Sized> {
    calculator: VoyageCalculator<'a, R>,
}

impl<R: ReferenceData + ?Sized> Clone for PortfolioOptimizer<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ReferenceData + ?Sized> Copy for PortfolioOptimizer<'_, R> {}

impl<'a, R: ReferenceData + ?Sized> PortfolioOptimizer<'a, R> {
    /// Creates an optimizer that prices voyages with `calculator`.
    pub fn new(calculator: VoyageCalculator<'a, R>) -> Self {
        Self { calculator }
    }

    /// The calculator used to price each pair.
    pub fn calculator(&self) -> &VoyageCalculator<'a, R> {
        &self.calculator
    }

    /// Optimizes the portfolio at default voyage parameters.
    pub fn optimize(&self, vessels: &[Vessel], cargoes: &[Cargo]) -> PortfolioResult {
        self.solve(vessels, cargoes, &VoyageParams::default())
    }

    /// Optimizes the portfolio with every voyage computed under `params`.
    pub fn optimize_with(
        &self,
        vessels: &[Vessel],
        cargoes: &[Cargo],
        params: &VoyageParams,
    ) -> Result<PortfolioResult> {
        params.validate()?;
        Ok(self.solve(vessels, cargoes, params))
    }

    /// Computes every (vessel, cargo) voyage, feasible or not.
    ///
    /// Results are ordered by vessel name, then cargo name. Pairs whose
    /// reference data is missing are skipped.
    pub fn all_voyages(
        &self,
        vessels: &[Vessel],
        cargoes: &[Cargo],
        params: &VoyageParams,
    ) -> Result<Vec<VoyageResult>> {
        params.validate()?;
        let grid = self.grid(vessels, cargoes, params);
        Ok(grid.cells.into_iter().flatten().collect())
    }

    fn grid<'v>(&self, vessels: &'v [Vessel], cargoes: &'v [Cargo], params: &VoyageParams) -> VoyageGrid<'v> {
        let vessels = sorted_by_name(vessels, Vessel::name);
        let cargoes = sorted_by_name(cargoes, Cargo::name);
        let mut cells = Vec::with_capacity(vessels.len() * cargoes.len());
        for vessel in &vessels {
            for cargo in &cargoes {
                match self.calculator.compute(vessel, cargo, params) {
                    Ok(voyage) => cells.push(Some(voyage)),
                    Err(e) => {
                        tracing::warn!(
                            vessel = vessel.name(),
                            cargo = cargo.name(),
                            error = %e,
                            "pair excluded from optimization"
                        );
                        cells.push(None);
                    }
                }
            }
        }
        VoyageGrid {
            vessels,
            cargoes,
            cells,
        }
    }

    /// Optimizes under `params` and also returns every computed voyage,
    /// ordered as in [`all_voyages`](Self::all_voyages).
    pub(crate) fn optimize_detailed(
        &self,
        vessels: &[Vessel],
        cargoes: &[Cargo],
        params: &VoyageParams,
    ) -> Result<(PortfolioResult, Vec<VoyageResult>)> {
        params.validate()?;
        let grid = self.grid(vessels, cargoes, params);
        let portfolio = Self::assign(&grid);
        Ok((portfolio, grid.cells.into_iter().flatten().collect()))
    }

    fn solve(&self, vessels: &[Vessel], cargoes: &[Cargo], params: &VoyageParams) -> PortfolioResult {
        Self::assign(&self.grid(vessels, cargoes, params))
    }

    fn assign(grid: &VoyageGrid<'_>) -> PortfolioResult {
        let weights = grid.weights();
        let matching = max_weight_matching(&weights);

        let mut vessel_used = vec![false; grid.vessels.len()];
        let mut cargo_used = vec![false; grid.cargoes.len()];
        let mut assignments = Vec::with_capacity(matching.len());
        for &(row, col) in &matching {
            if let Some(voyage) = grid.cell(row, col) {
                vessel_used[row] = true;
                cargo_used[col] = true;
                assignments.push(Assignment::new(voyage.clone()));
            }
        }

        let unassigned_vessels = grid
            .vessels
            .iter()
            .zip(&vessel_used)
            .filter(|(_, &used)| !used)
            .map(|(v, _)| v.name().to_string())
            .collect();
        let unassigned_cargoes = grid
            .cargoes
            .iter()
            .zip(&cargo_used)
            .filter(|(_, &used)| !used)
            .map(|(c, _)| c.name().to_string())
            .collect();

        let result = PortfolioResult::from_assignments(assignments, unassigned_vessels, unassigned_cargoes);
        tracing::debug!(
            candidates = weights.num_edges(),
            assignments = result.num_assignments(),
            total_profit = result.total_profit,
            "portfolio optimized"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoyageError;
    use crate::models::{FuelQuantities, Laycan, SpeedProfile};
    use crate::reference::{ConsumptionProfile, ReferenceTables};
    use crate::settings::CostSettings;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date")
    }

    fn profile() -> ConsumptionProfile {
        ConsumptionProfile {
            ballast: FuelQuantities::new(40.0, 2.0),
            ballast_eco: FuelQuantities::new(30.0, 2.0),
            laden: FuelQuantities::new(45.0, 2.0),
            laden_eco: FuelQuantities::new(35.0, 2.0),
            ..ConsumptionProfile::default()
        }
    }

    fn vessel(name: &str, etd: NaiveDate) -> Vessel {
        Vessel::new(name, 180_000, 10_000.0, SpeedProfile::new(14.0, 12.0, 14.0, 12.0), "A", etd)
    }

    fn cargo(name: &str, to: &str, qty: u32, rate: f64, laycan: (u32, u32)) -> Cargo {
        Cargo::new(name, "A", to, qty, rate)
            .with_laycan(Laycan::new(d(laycan.0), d(laycan.1)).expect("valid"))
            .with_rates(10_000.0, 10_000.0)
    }

    fn tables() -> ReferenceTables {
        ReferenceTables::new()
            .with_distance("A", "B", 3_000.0)
            .with_distance("A", "C", 4_000.0)
            .with_distance("B", "C", 2_000.0)
            .with_consumption("Alpha", profile())
            .with_consumption("Bravo", profile())
            .with_base_prices(FuelQuantities::new(500.0, 700.0))
    }

    /// Bravo sails too late for Ore; the optimum gives Coal to Bravo so
    /// Alpha can still lift Ore.
    fn fleet() -> (Vec<Vessel>, Vec<Cargo>) {
        let vessels = vec![vessel("Bravo", d(15)), vessel("Alpha", d(1))];
        let cargoes = vec![
            cargo("Ore", "C", 60_000, 18.0, (5, 10)),
            cargo("Coal", "B", 50_000, 20.0, (10, 30)),
        ];
        (vessels, cargoes)
    }

    #[test]
    fn test_empty_fleet() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let result = opt.optimize(&[], &[]);
        assert_eq!(result.num_assignments(), 0);
        assert_eq!(result.total_profit, 0.0);
        assert_eq!(result.avg_tce, 0.0);
    }

    #[test]
    fn test_optimal_assignment_respects_feasibility() {
        let tables = tables();
        let calc = VoyageCalculator::new(&tables, CostSettings::default());
        let opt = PortfolioOptimizer::new(calc);
        let (vessels, cargoes) = fleet();

        let bravo_ore = calc
            .compute(&vessels[0], &cargoes[0], &VoyageParams::default())
            .expect("computes");
        assert!(!bravo_ore.can_make_laycan);

        let result = opt.optimize(&vessels, &cargoes);
        assert_eq!(result.num_assignments(), 2);
        assert_eq!(result.assignment_for_vessel("Alpha").map(|a| a.cargo.as_str()), Some("Ore"));
        assert_eq!(result.assignment_for_vessel("Bravo").map(|a| a.cargo.as_str()), Some("Coal"));
        assert!(result.assignments.iter().all(|a| a.voyage.can_make_laycan));
        assert!(result.unassigned_vessels.is_empty());
        assert!(result.unassigned_cargoes.is_empty());

        let total: f64 = result.assignments.iter().map(|a| a.voyage.net_profit).sum();
        assert!((result.total_profit - total).abs() < 1e-6);
    }

    #[test]
    fn test_assignments_ordered_by_vessel_name() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let (vessels, cargoes) = fleet();
        let result = opt.optimize(&vessels, &cargoes);
        let names: Vec<&str> = result.assignments.iter().map(|a| a.vessel.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);
    }

    #[test]
    fn test_tie_goes_to_first_vessel_name() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let vessels = vec![vessel("Bravo", d(1)), vessel("Alpha", d(1))];
        let cargoes = vec![cargo("Coal", "B", 50_000, 20.0, (10, 30))];

        let voyages = opt
            .all_voyages(&vessels, &cargoes, &VoyageParams::default())
            .expect("valid params");
        assert_eq!(voyages[0].net_profit, voyages[1].net_profit);

        let result = opt.optimize(&vessels, &cargoes);
        assert_eq!(result.pairs(), vec![("Alpha".to_string(), "Coal".to_string())]);
        assert_eq!(result.unassigned_vessels, vec!["Bravo".to_string()]);
    }

    #[test]
    fn test_loss_making_cargo_left_unassigned() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let vessels = vec![vessel("Alpha", d(1))];
        let cargoes = vec![cargo("Cheap", "B", 50_000, 1.0, (1, 30))];
        let result = opt.optimize(&vessels, &cargoes);
        assert_eq!(result.num_assignments(), 0);
        assert_eq!(result.unassigned_vessels, vec!["Alpha".to_string()]);
        assert_eq!(result.unassigned_cargoes, vec!["Cheap".to_string()]);
    }

    #[test]
    fn test_missing_route_excludes_pair() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let vessels = vec![vessel("Alpha", d(1))];
        let cargoes = vec![
            cargo("Coal", "B", 50_000, 20.0, (10, 30)),
            cargo("Lost", "Nowhere", 50_000, 90.0, (10, 30)),
        ];
        let result = opt.optimize(&vessels, &cargoes);
        assert_eq!(result.pairs(), vec![("Alpha".to_string(), "Coal".to_string())]);
        assert_eq!(result.unassigned_cargoes, vec!["Lost".to_string()]);

        let all = opt
            .all_voyages(&vessels, &cargoes, &VoyageParams::default())
            .expect("valid params");
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let (mut vessels, mut cargoes) = fleet();
        let first = opt.optimize(&vessels, &cargoes);
        vessels.reverse();
        cargoes.reverse();
        let second = opt.optimize(&vessels, &cargoes);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_voyages_sorted() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let (vessels, cargoes) = fleet();
        let all = opt
            .all_voyages(&vessels, &cargoes, &VoyageParams::default())
            .expect("valid params");
        let pairs: Vec<(&str, &str)> = all.iter().map(|v| v.pair()).collect();
        assert_eq!(
            pairs,
            vec![("Alpha", "Coal"), ("Alpha", "Ore"), ("Bravo", "Coal"), ("Bravo", "Ore")]
        );
    }

    #[test]
    fn test_optimize_with_rejects_invalid_params() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let (vessels, cargoes) = fleet();
        let err = opt
            .optimize_with(&vessels, &cargoes, &VoyageParams::default().with_extra_delay(-1.0))
            .expect_err("negative delay");
        assert!(matches!(err, VoyageError::Validation { .. }));
    }

    #[test]
    fn test_delay_can_change_assignment() {
        let tables = tables();
        let opt = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
        let (vessels, cargoes) = fleet();
        // Alpha waits 4 days for Ore's laycan; 6 more days misses its end
        let late = opt
            .optimize_with(&vessels, &cargoes, &VoyageParams::default().with_extra_delay(6.0))
            .expect("valid");
        assert!(late.assignment_for_cargo("Ore").is_none());
        assert_eq!(late.num_assignments(), 1);
    }
}
