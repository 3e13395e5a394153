//! Intermediate bunkering recommendation.
//!
//! When a voyage burns more of a fuel than the vessel has aboard, the
//! shortfall has to be bought somewhere. The base price applies unless a
//! bunkering hub lying along one of the voyage's legs sells it cheaper.
//!
//! A hub lies along a leg `a → b` when the detour `a → hub → b` is no
//! longer than the direct distance times `1 + tolerance`. A hub that is the
//! leg's own origin or destination always qualifies.

use crate::models::{FuelQuantities, FuelType};
use crate::reference::{BunkerHub, ReferenceData};

/// A cheaper bunkering port for the voyage's fuel shortfall.
#[derive(Debug, Clone, PartialEq)]
pub struct BunkerRecommendation {
    pub port: String,
    /// Savings per fuel type versus buying the shortfall at base price,
    /// already scaled by the bunker multiplier.
    pub savings: FuelQuantities,
}

impl BunkerRecommendation {
    /// Total savings across both fuels.
    pub fn total_savings(&self) -> f64 {
        self.savings.total()
    }
}

fn lies_along<R: ReferenceData + ?Sized>(
    reference: &R,
    hub: &str,
    from: &str,
    to: &str,
    tolerance: f64,
) -> bool {
    if hub == from || hub == to {
        return true;
    }
    let (Some(direct), Some(first), Some(second)) = (
        reference.distance(from, to),
        reference.distance(from, hub),
        reference.distance(hub, to),
    ) else {
        return false;
    };
    first + second <= direct * (1.0 + tolerance) + 1e-9
}

fn hub_savings(hub: &BunkerHub, shortfall: &FuelQuantities, base: &FuelQuantities, multiplier: f64) -> FuelQuantities {
    let mut savings = FuelQuantities::zero();
    for fuel in FuelType::ALL {
        let discount = (base.get(fuel) - hub.prices.get(fuel)).max(0.0);
        savings.set(fuel, shortfall.get(fuel) * discount * multiplier);
    }
    savings
}

/// Picks the hub along `legs` with the largest savings on `shortfall`.
///
/// Ties go to the hub whose port name sorts first. Returns `None` when no
/// hub along the route beats the base price.
///
/// # Examples
///
/// ```
/// use u_voyage::calculator::recommend_bunkering;
/// use u_voyage::models::FuelQuantities;
/// use u_voyage::reference::{BunkerHub, ReferenceTables};
///
/// let tables = ReferenceTables::new()
///     .with_distance("Kamsar", "Qingdao", 11_000.0)
///     .with_distance("Kamsar", "Singapore", 6_000.0)
///     .with_distance("Singapore", "Qingdao", 5_000.0)
///     .with_hub(BunkerHub::new("Singapore", FuelQuantities::new(450.0, 600.0)));
///
/// let rec = recommend_bunkering(
///     &tables,
///     &[("Kamsar", "Qingdao")],
///     FuelQuantities::new(100.0, 0.0),
///     FuelQuantities::new(500.0, 650.0),
///     1.0,
///     0.05,
/// )
/// .unwrap();
/// assert_eq!(rec.port, "Singapore");
/// assert_eq!(rec.total_savings(), 5_000.0);
/// ```
pub fn recommend_bunkering<R: ReferenceData + ?Sized>(
    reference: &R,
    legs: &[(&str, &str)],
    shortfall: FuelQuantities,
    base: FuelQuantities,
    multiplier: f64,
    tolerance: f64,
) -> Option<BunkerRecommendation> {
    let mut hubs: Vec<&BunkerHub> = reference.bunker_hubs().iter().collect();
    hubs.sort_by(|a, b| a.port.cmp(&b.port));

    let mut best: Option<BunkerRecommendation> = None;
    for hub in hubs {
        let on_route = legs
            .iter()
            .any(|&(from, to)| lies_along(reference, &hub.port, from, to, tolerance));
        if !on_route {
            continue;
        }
        let savings = hub_savings(hub, &shortfall, &base, multiplier);
        if savings.total() <= 0.0 {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|b| savings.total() > b.total_savings())
        {
            best = Some(BunkerRecommendation {
                port: hub.port.clone(),
                savings,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceTables;

    fn tables() -> ReferenceTables {
        ReferenceTables::new()
            .with_distance("A", "B", 1_000.0)
            .with_distance("A", "H1", 500.0)
            .with_distance("H1", "B", 520.0)
            .with_distance("A", "H2", 900.0)
            .with_distance("H2", "B", 900.0)
            .with_hub(BunkerHub::new("H1", FuelQuantities::new(450.0, 700.0)))
            .with_hub(BunkerHub::new("H2", FuelQuantities::new(300.0, 500.0)))
    }

    #[test]
    fn test_hub_within_tolerance() {
        let rec = recommend_bunkering(
            &tables(),
            &[("A", "B")],
            FuelQuantities::new(100.0, 0.0),
            FuelQuantities::new(500.0, 650.0),
            1.0,
            0.05,
        )
        .expect("H1 is along the route");
        // H1 detour 1020 <= 1050; H2 detour 1800 is too far
        assert_eq!(rec.port, "H1");
        assert!((rec.total_savings() - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_wider_tolerance_prefers_bigger_savings() {
        let rec = recommend_bunkering(
            &tables(),
            &[("A", "B")],
            FuelQuantities::new(100.0, 10.0),
            FuelQuantities::new(500.0, 650.0),
            1.0,
            1.0,
        )
        .expect("both hubs qualify");
        assert_eq!(rec.port, "H2");
        // 100 * 200 + 10 * 150
        assert!((rec.total_savings() - 21_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_scales_savings() {
        let rec = recommend_bunkering(
            &tables(),
            &[("A", "B")],
            FuelQuantities::new(100.0, 0.0),
            FuelQuantities::new(500.0, 650.0),
            1.5,
            0.05,
        )
        .expect("H1");
        assert!((rec.total_savings() - 7_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_cheaper_hub() {
        let rec = recommend_bunkering(
            &tables(),
            &[("A", "B")],
            FuelQuantities::new(100.0, 0.0),
            FuelQuantities::new(400.0, 650.0),
            1.0,
            0.05,
        );
        assert!(rec.is_none());
    }

    #[test]
    fn test_hub_at_leg_endpoint() {
        let tables = ReferenceTables::new()
            .with_hub(BunkerHub::new("A", FuelQuantities::new(400.0, 600.0)));
        let rec = recommend_bunkering(
            &tables,
            &[("A", "B")],
            FuelQuantities::new(10.0, 0.0),
            FuelQuantities::new(500.0, 650.0),
            1.0,
            0.0,
        )
        .expect("endpoint hub");
        assert_eq!(rec.port, "A");
    }

    #[test]
    fn test_tie_broken_by_port_name() {
        let tables = ReferenceTables::new()
            .with_hub(BunkerHub::new("Zeebrugge", FuelQuantities::new(400.0, 600.0)))
            .with_hub(BunkerHub::new("B", FuelQuantities::new(400.0, 600.0)))
            .with_hub(BunkerHub::new("A", FuelQuantities::new(400.0, 600.0)));
        let rec = recommend_bunkering(
            &tables,
            &[("A", "B")],
            FuelQuantities::new(10.0, 0.0),
            FuelQuantities::new(500.0, 650.0),
            1.0,
            0.0,
        )
        .expect("tie");
        assert_eq!(rec.port, "A");
    }
}
