mod common;

use std::collections::HashSet;

use common::{arb_fleet, Fleet};
use proptest::prelude::*;
use u_voyage::calculator::VoyageCalculator;
use u_voyage::models::{PortfolioResult, VoyageParams, VoyageResult};
use u_voyage::optimizer::PortfolioOptimizer;
use u_voyage::reference::ReferenceTables;
use u_voyage::settings::CostSettings;

fn optimizer(tables: &ReferenceTables) -> PortfolioOptimizer<'_, ReferenceTables> {
    PortfolioOptimizer::new(VoyageCalculator::new(tables, CostSettings::default()))
}

fn optimize(fleet: &Fleet, params: &VoyageParams) -> PortfolioResult {
    optimizer(&fleet.tables)
        .optimize_with(&fleet.vessels, &fleet.cargoes, params)
        .expect("valid params")
}

/// Best total over every one-to-one selection of feasible, profitable voyages.
fn brute_force(voyages: &[VoyageResult], used_vessels: &mut HashSet<String>, used_cargoes: &mut HashSet<String>, from: usize) -> f64 {
    let mut best = 0.0f64;
    for (i, v) in voyages.iter().enumerate().skip(from) {
        if !v.can_make_laycan || v.net_profit <= 0.0 {
            continue;
        }
        if used_vessels.contains(&v.vessel) || used_cargoes.contains(&v.cargo) {
            continue;
        }
        used_vessels.insert(v.vessel.clone());
        used_cargoes.insert(v.cargo.clone());
        best = best.max(v.net_profit + brute_force(voyages, used_vessels, used_cargoes, i + 1));
        used_vessels.remove(&v.vessel);
        used_cargoes.remove(&v.cargo);
    }
    best
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn portfolio_is_a_valid_assignment(fleet in arb_fleet(5, 5)) {
        let result = optimize(&fleet, &VoyageParams::default());

        let vessels: HashSet<_> = result.assignments.iter().map(|a| a.vessel.clone()).collect();
        let cargoes: HashSet<_> = result.assignments.iter().map(|a| a.cargo.clone()).collect();
        prop_assert_eq!(vessels.len(), result.num_assignments());
        prop_assert_eq!(cargoes.len(), result.num_assignments());
        for a in &result.assignments {
            prop_assert!(a.voyage.can_make_laycan);
            prop_assert!(a.voyage.net_profit > 0.0);
        }

        prop_assert_eq!(vessels.len() + result.unassigned_vessels.len(), fleet.vessels.len());
        prop_assert_eq!(cargoes.len() + result.unassigned_cargoes.len(), fleet.cargoes.len());
        prop_assert!(result.unassigned_vessels.iter().all(|v| !vessels.contains(v)));
        prop_assert!(result.unassigned_cargoes.iter().all(|c| !cargoes.contains(c)));

        let sum: f64 = result.assignments.iter().map(|a| a.voyage.net_profit).sum();
        prop_assert!(close(result.total_profit, sum));
    }

    #[test]
    fn portfolio_matches_exhaustive_search(fleet in arb_fleet(4, 4)) {
        let opt = optimizer(&fleet.tables);
        let params = VoyageParams::default();
        let voyages = opt.all_voyages(&fleet.vessels, &fleet.cargoes, &params).expect("valid params");
        let result = optimize(&fleet, &params);

        let best = brute_force(&voyages, &mut HashSet::new(), &mut HashSet::new(), 0);
        prop_assert!(close(result.total_profit, best), "optimizer {} vs exhaustive {}", result.total_profit, best);
    }

    #[test]
    fn portfolio_ignores_input_order(fleet in arb_fleet(5, 5)) {
        let params = VoyageParams::default();
        let forward = optimize(&fleet, &params);

        let mut reversed = fleet.clone();
        reversed.vessels.reverse();
        reversed.cargoes.reverse();
        let backward = optimize(&reversed, &params);

        prop_assert_eq!(forward.pairs(), backward.pairs());
        prop_assert_eq!(forward.total_profit, backward.total_profit);
    }

    #[test]
    fn profit_never_rises_with_bunker_price(fleet in arb_fleet(4, 4), low in 0.5f64..1.5, step in 0.01f64..1.0) {
        let cheap = optimize(&fleet, &VoyageParams::default().with_bunker_multiplier(low));
        let dear = optimize(&fleet, &VoyageParams::default().with_bunker_multiplier(low + step));
        prop_assert!(dear.total_profit <= cheap.total_profit + 1e-6);
    }

    #[test]
    fn delay_never_restores_feasibility(fleet in arb_fleet(3, 3), delay in 0.0f64..20.0, extra in 0.0f64..10.0) {
        let opt = optimizer(&fleet.tables);
        let early = VoyageParams::default().with_extra_delay(delay);
        let late = VoyageParams::default().with_extra_delay(delay + extra);
        let before = opt.all_voyages(&fleet.vessels, &fleet.cargoes, &early).expect("valid params");
        let after = opt.all_voyages(&fleet.vessels, &fleet.cargoes, &late).expect("valid params");

        prop_assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            prop_assert_eq!(b.pair(), a.pair());
            prop_assert!(!a.can_make_laycan || b.can_make_laycan);
            prop_assert!(a.net_profit <= b.net_profit + 1e-6);
        }

        let p_before = optimize(&fleet, &early);
        let p_after = optimize(&fleet, &late);
        prop_assert!(p_after.total_profit <= p_before.total_profit + 1e-6);
    }

    #[test]
    fn voyage_accounting_balances(fleet in arb_fleet(3, 3)) {
        let voyages = optimizer(&fleet.tables)
            .all_voyages(&fleet.vessels, &fleet.cargoes, &VoyageParams::default())
            .expect("valid params");
        for r in &voyages {
            prop_assert!(close(r.total_days, r.days.total()));
            prop_assert!(close(r.net_freight, r.gross_freight - r.commission_cost));
            let profit = r.net_freight - r.total_bunker_cost - r.hire_cost - r.port_costs - r.misc_costs;
            prop_assert!(close(r.net_profit, profit));
            prop_assert!(close(r.total_bunker_cost, r.bunker_cost_vlsfo + r.bunker_cost_mgo));
            prop_assert!(r.days.waiting_days >= 0.0);
        }
    }
}
