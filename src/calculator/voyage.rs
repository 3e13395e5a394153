//! Voyage economics calculator.

use super::bunkering::recommend_bunkering;
use crate::error::{Result, VoyageError};
use crate::models::{
    date_after, days_between, Cargo, DayBreakdown, FuelQuantities, Leg, Vessel, VoyageParams,
    VoyageResult,
};
use crate::reference::ReferenceData;
use crate::settings::CostSettings;

/// Slack when comparing the effective arrival against the laycan end, so
/// that float noise on an exact-boundary arrival does not flip feasibility.
const LAYCAN_EPS: f64 = 1e-9;

/// Computes the full economics of one vessel carrying one cargo.
///
/// The calculator is a pure function of its inputs: it reads reference data
/// and settings and touches no shared mutable state, so a single instance
/// can serve any number of threads.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_voyage::calculator::VoyageCalculator;
/// use u_voyage::models::{Cargo, FuelQuantities, Laycan, SpeedProfile, Vessel, VoyageParams};
/// use u_voyage::reference::{ConsumptionProfile, ReferenceTables};
/// use u_voyage::settings::CostSettings;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let vessel = Vessel::new("Ann Bell", 180_000, 12_000.0, SpeedProfile::new(14.0, 12.0, 14.0, 12.0), "Kamsar", d(1));
/// let cargo = Cargo::new("EGA Bauxite", "Kamsar", "Qingdao", 70_000, 25.0)
///     .with_laycan(Laycan::new(d(10), d(20)).unwrap())
///     .with_rates(10_000.0, 8_000.0);
/// let tables = ReferenceTables::new()
///     .with_distance("Kamsar", "Qingdao", 11_000.0)
///     .with_consumption("Ann Bell", ConsumptionProfile::default())
///     .with_base_prices(FuelQuantities::new(490.0, 650.0));
///
/// let calc = VoyageCalculator::new(&tables, CostSettings::default());
/// let result = calc.compute(&vessel, &cargo, &VoyageParams::default()).unwrap();
/// assert!(result.can_make_laycan);
/// assert_eq!(result.days.waiting_days, 9.0);
/// ```
pub struct VoyageCalculator<'a, R: ReferenceData + ?Sized> {
    reference: &'a R,
    costs: CostSettings,
}

impl<R: ReferenceData + ?Sized> Clone for VoyageCalculator<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ReferenceData + ?Sized> Copy for VoyageCalculator<'_, R> {}

impl<'a, R: ReferenceData + ?Sized> VoyageCalculator<'a, R> {
    /// Creates a calculator over the given reference data.
    pub fn new(reference: &'a R, costs: CostSettings) -> Self {
        Self { reference, costs }
    }

    /// Cost settings applied to every voyage.
    pub fn costs(&self) -> &CostSettings {
        &self.costs
    }

    fn distance(&self, from: &str, to: &str) -> Result<f64> {
        self.reference.distance(from, to).ok_or_else(|| {
            VoyageError::DataUnavailable(format!("no distance from {from} to {to}"))
        })
    }

    /// Computes the voyage of `vessel` carrying `cargo` under `params`.
    ///
    /// A missed laycan is reported through `can_make_laycan`, never as an
    /// error. Missing distances, consumption profile or base prices yield
    /// [`VoyageError::DataUnavailable`].
    pub fn compute(&self, vessel: &Vessel, cargo: &Cargo, params: &VoyageParams) -> Result<VoyageResult> {
        params.validate()?;
        let mode = params.speed_mode;
        let speeds = vessel.speeds();
        if !speeds.is_valid() {
            return Err(VoyageError::validation(
                format!("vessels[{}].speed", vessel.name()),
                "speeds must be positive",
            ));
        }

        // Sea legs
        let ballast_nm = self.distance(vessel.current_port(), cargo.load_port())?;
        let laden_nm = self.distance(cargo.load_port(), cargo.discharge_port())?;
        let ballast_days = ballast_nm / speeds.speed(Leg::Ballast, mode) / 24.0;
        let laden_days = laden_nm / speeds.speed(Leg::Laden, mode) / 24.0;

        // Cargo handling
        let quantity = cargo.quantity() as f64;
        let load_days = quantity / cargo.load_rate();
        let discharge_days = quantity / cargo.discharge_rate();

        // Arrival against the laycan, in days after ETD
        let laycan_start = days_between(vessel.etd(), cargo.laycan().start());
        let laycan_end = days_between(vessel.etd(), cargo.laycan().end());
        let provisional_arrival = ballast_days;
        let waiting_days = (laycan_start - provisional_arrival).max(0.0) + params.extra_delay;
        let effective_arrival = provisional_arrival + waiting_days;
        let can_make_laycan = effective_arrival <= laycan_end + LAYCAN_EPS;
        let days_margin = laycan_end - effective_arrival;
        let arrival_date = date_after(vessel.etd(), effective_arrival).ok_or_else(|| {
            VoyageError::validation(
                "extra_port_delay",
                format!("arrival {effective_arrival:.1} days after ETD is out of calendar range"),
            )
        })?;

        let days = DayBreakdown {
            ballast_days,
            laden_days,
            load_days,
            discharge_days,
            waiting_days,
        };
        let total_days = days.total();

        // Fuel
        let profile = self.reference.consumption(vessel.name()).ok_or_else(|| {
            VoyageError::DataUnavailable(format!("no consumption profile for {}", vessel.name()))
        })?;
        let consumed = profile.sea_rate(Leg::Ballast, mode) * ballast_days
            + profile.sea_rate(Leg::Laden, mode) * laden_days
            + profile.port_working * days.working_days()
            + profile.port_idle * waiting_days;
        let base_prices = self
            .reference
            .base_prices()
            .ok_or_else(|| VoyageError::DataUnavailable("no base bunker prices".into()))?;

        let shortfall = consumed.shortfall_against(&vessel.bunkers_rob());
        let recommendation = if shortfall.total() > 0.0 {
            recommend_bunkering(
                self.reference,
                &[
                    (vessel.current_port(), cargo.load_port()),
                    (cargo.load_port(), cargo.discharge_port()),
                ],
                shortfall,
                base_prices,
                params.bunker_multiplier,
                self.costs.bunker_deviation_tolerance,
            )
        } else {
            None
        };
        let savings = recommendation
            .as_ref()
            .map(|r| r.savings)
            .unwrap_or_else(FuelQuantities::zero);
        let bunker_cost = consumed.product(&base_prices) * params.bunker_multiplier - savings;
        let total_bunker_cost = bunker_cost.total();

        // Revenue
        let gross_freight = cargo.freight_rate() * quantity;
        let commission_cost = gross_freight * cargo.commission();
        let net_freight = gross_freight - commission_cost;

        // Costs
        let hire_cost = vessel.hire_rate() * total_days;
        let port_costs = cargo.port_cost_load() + cargo.port_cost_discharge();
        let misc_costs = self.costs.misc_overhead;

        let net_profit = net_freight - total_bunker_cost - hire_cost - port_costs - misc_costs;
        let tce = if total_days > 0.0 {
            (net_freight - total_bunker_cost - port_costs) / total_days
        } else {
            0.0
        };

        tracing::trace!(
            vessel = vessel.name(),
            cargo = cargo.name(),
            can_make_laycan,
            total_days,
            net_profit,
            "voyage computed"
        );

        Ok(VoyageResult {
            vessel: vessel.name().to_string(),
            cargo: cargo.name().to_string(),
            speed_type: mode,
            can_make_laycan,
            arrival_date,
            laycan_end: cargo.laycan().end(),
            days_margin,
            total_days,
            days,
            cargo_qty: cargo.quantity(),
            gross_freight,
            net_freight,
            commission_cost,
            total_bunker_cost,
            bunker_cost_vlsfo: bunker_cost.vlsfo,
            bunker_cost_mgo: bunker_cost.mgo,
            hire_cost,
            port_costs,
            misc_costs,
            net_profit,
            tce,
            vlsfo_consumed: consumed.vlsfo,
            mgo_consumed: consumed.mgo,
            bunker_port: recommendation.as_ref().map(|r| r.port.clone()),
            bunker_savings: savings.total(),
        })
    }
}
