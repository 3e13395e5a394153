//! Random fleet generation shared by the property suites.

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use u_voyage::models::{Cargo, FuelQuantities, Laycan, SpeedProfile, Vessel};
use u_voyage::reference::{ConsumptionProfile, ReferenceTables};

pub const PORTS: [&str; 4] = ["Kamsar", "Qingdao", "Port Hedland", "Itaguai"];

const ROUTES: [(&str, &str, f64); 6] = [
    ("Kamsar", "Qingdao", 11_124.0),
    ("Kamsar", "Port Hedland", 9_300.0),
    ("Kamsar", "Itaguai", 3_100.0),
    ("Qingdao", "Port Hedland", 3_400.0),
    ("Qingdao", "Itaguai", 11_000.0),
    ("Port Hedland", "Itaguai", 9_700.0),
];

pub fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.checked_add_days(Days::new(u64::from(offset))))
        .expect("valid date")
}

pub fn profile() -> ConsumptionProfile {
    ConsumptionProfile {
        ballast: FuelQuantities::new(38.0, 2.0),
        ballast_eco: FuelQuantities::new(30.0, 2.0),
        laden: FuelQuantities::new(42.0, 2.0),
        laden_eco: FuelQuantities::new(34.0, 2.0),
        port_working: FuelQuantities::new(0.0, 3.0),
        port_idle: FuelQuantities::new(0.0, 2.0),
    }
}

/// A generated fleet with reference tables covering every vessel.
#[derive(Debug, Clone)]
pub struct Fleet {
    pub vessels: Vec<Vessel>,
    pub cargoes: Vec<Cargo>,
    pub tables: ReferenceTables,
}

fn tables_for(vessels: &[Vessel]) -> ReferenceTables {
    let mut tables = ReferenceTables::new().with_base_prices(FuelQuantities::new(490.0, 650.0));
    for (a, b, nm) in ROUTES {
        tables = tables.with_distance(a, b, nm);
    }
    for v in vessels {
        tables = tables.with_consumption(v.name(), profile());
    }
    tables
}

fn arb_vessel(index: usize) -> impl Strategy<Value = Vessel> {
    (0u32..40, 0..PORTS.len(), 8_000.0f64..20_000.0, 11.0f64..13.0).prop_map(
        move |(etd, port, hire, eco)| {
            let speeds = SpeedProfile::new(eco + 1.5, eco, eco + 2.0, eco + 0.5);
            Vessel::new(format!("V{index}"), 180_000, hire, speeds, PORTS[port], day(etd))
        },
    )
}

fn arb_cargo(index: usize) -> impl Strategy<Value = Cargo> {
    (
        0..PORTS.len(),
        0..PORTS.len(),
        60_000u32..180_000,
        8.0f64..30.0,
        0u32..60,
        1u32..15,
    )
        .prop_map(move |(load, discharge, qty, rate, start, len)| {
            let laycan = Laycan::new(day(start), day(start + len)).expect("ordered laycan");
            Cargo::new(format!("C{index}"), PORTS[load], PORTS[discharge], qty, rate)
                .with_laycan(laycan)
                .with_rates(30_000.0, 25_000.0)
                .with_port_costs(50_000.0, 50_000.0)
                .with_commission(0.0125)
        })
}

fn arb_vessels(max: usize) -> impl Strategy<Value = Vec<Vessel>> {
    (1..=max).prop_flat_map(|n| (0..n).map(arb_vessel).collect::<Vec<_>>())
}

fn arb_cargoes(max: usize) -> impl Strategy<Value = Vec<Cargo>> {
    (1..=max).prop_flat_map(|n| (0..n).map(arb_cargo).collect::<Vec<_>>())
}

/// Fleets of 1..=`max_vessels` vessels and 1..=`max_cargoes` cargoes with
/// unique names.
pub fn arb_fleet(max_vessels: usize, max_cargoes: usize) -> impl Strategy<Value = Fleet> {
    (arb_vessels(max_vessels), arb_cargoes(max_cargoes)).prop_map(|(vessels, cargoes)| Fleet {
        tables: tables_for(&vessels),
        vessels,
        cargoes,
    })
}
