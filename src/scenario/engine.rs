//! Bunker price and port delay sweeps.

use std::collections::HashMap;

use super::{DelaySweep, PairPoint, PairThreshold, ScenarioPoint};
use crate::error::{EntityKind, Result, VoyageError};
use crate::models::{Cargo, Vessel, VoyageParams};
use crate::optimizer::PortfolioOptimizer;
use crate::reference::ReferenceData;

/// Evenly spaced values from `min` to `max` inclusive.
///
/// A single step yields just `min`.
fn linear_steps(min: f64, max: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(VoyageError::validation("steps", "must be at least 1"));
    }
    if !min.is_finite() || min <= 0.0 {
        return Err(VoyageError::validation("parameter_min", "must be a positive number"));
    }
    if !max.is_finite() || max < min {
        return Err(VoyageError::validation(
            "parameter_max",
            "must be a number no smaller than parameter_min",
        ));
    }
    if steps == 1 {
        return Ok(vec![min]);
    }
    let span = max - min;
    let last = steps - 1;
    Ok((0..steps)
        .map(|i| if i == last { max } else { min + span * i as f64 / last as f64 })
        .collect())
}

/// Re-optimizes a fleet while one market parameter varies.
///
/// Every sweep point is computed from scratch; nothing is cached between
/// points or calls.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_voyage::calculator::VoyageCalculator;
/// use u_voyage::models::{Cargo, FuelQuantities, Laycan, SpeedProfile, Vessel};
/// use u_voyage::optimizer::PortfolioOptimizer;
/// use u_voyage::reference::{ConsumptionProfile, ReferenceTables};
/// use u_voyage::scenario::ScenarioEngine;
/// use u_voyage::settings::CostSettings;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let vessels = vec![Vessel::new("Ann Bell", 180_000, 12_000.0,
///     SpeedProfile::new(14.0, 12.0, 14.0, 12.0), "Kamsar", d(1))];
/// let cargoes = vec![Cargo::new("EGA Bauxite", "Kamsar", "Qingdao", 70_000, 25.0)
///     .with_laycan(Laycan::new(d(5), d(20)).unwrap())
///     .with_rates(10_000.0, 8_000.0)];
/// let tables = ReferenceTables::new()
///     .with_distance("Kamsar", "Qingdao", 11_000.0)
///     .with_consumption("Ann Bell", ConsumptionProfile::default())
///     .with_base_prices(FuelQuantities::new(490.0, 650.0));
///
/// let optimizer = PortfolioOptimizer::new(VoyageCalculator::new(&tables, CostSettings::default()));
/// let engine = ScenarioEngine::new(optimizer, &vessels, &cargoes);
/// let points = engine.bunker_sweep(0.8, 1.5, 8).unwrap();
/// assert_eq!(points.len(), 8);
/// assert_eq!(points[7].parameter_value, 1.5);
/// ```
pub struct ScenarioEngine<'a, R: ReferenceData + ?Sized> {
    optimizer: PortfolioOptimizer<'a, R>,
    vessels: &'a [Vessel],
    cargoes: &'a [Cargo],
}

impl<'a, R: ReferenceData + ?Sized> ScenarioEngine<'a, R> {
    pub fn new(optimizer: PortfolioOptimizer<'a, R>, vessels: &'a [Vessel], cargoes: &'a [Cargo]) -> Self {
        Self {
            optimizer,
            vessels,
            cargoes,
        }
    }

    /// Optimal portfolio at each bunker multiplier from `min` to `max`.
    pub fn bunker_sweep(&self, min: f64, max: f64, steps: usize) -> Result<Vec<ScenarioPoint>> {
        let multipliers = linear_steps(min, max, steps)?;
        tracing::debug!(min, max, steps, "bunker sweep");
        multipliers
            .into_iter()
            .map(|m| {
                let params = VoyageParams::default().with_bunker_multiplier(m);
                let portfolio = self.optimizer.optimize_with(self.vessels, self.cargoes, &params)?;
                Ok(ScenarioPoint::from_portfolio(m, &portfolio))
            })
            .collect()
    }

    /// One pair's voyage at each bunker multiplier from `min` to `max`.
    pub fn bunker_sweep_pair(
        &self,
        vessel: &str,
        cargo: &str,
        min: f64,
        max: f64,
        steps: usize,
    ) -> Result<Vec<PairPoint>> {
        let vessel = self
            .vessels
            .iter()
            .find(|v| v.name() == vessel)
            .ok_or_else(|| VoyageError::not_found(EntityKind::Vessel, vessel))?;
        let cargo = self
            .cargoes
            .iter()
            .find(|c| c.name() == cargo)
            .ok_or_else(|| VoyageError::not_found(EntityKind::Cargo, cargo))?;
        let calculator = self.optimizer.calculator();
        linear_steps(min, max, steps)?
            .into_iter()
            .map(|m| {
                let params = VoyageParams::default().with_bunker_multiplier(m);
                Ok(PairPoint {
                    parameter_value: m,
                    voyage: calculator.compute(vessel, cargo, &params)?,
                })
            })
            .collect()
    }

    /// Optimal portfolio at each whole day of extra port delay from zero to
    /// `max_delay_days`, plus the delay at which each pair stops being
    /// feasible.
    pub fn port_delay_sweep(&self, max_delay_days: u32) -> Result<DelaySweep> {
        tracing::debug!(max_delay_days, "port delay sweep");
        let mut sweep = DelaySweep::default();
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut feasible_at_zero: Vec<bool> = Vec::new();

        for day in 0..=max_delay_days {
            let delay = f64::from(day);
            let params = VoyageParams::default().with_extra_delay(delay);
            let (portfolio, voyages) =
                self.optimizer
                    .optimize_detailed(self.vessels, self.cargoes, &params)?;
            sweep.points.push(ScenarioPoint::from_portfolio(delay, &portfolio));

            for voyage in voyages {
                if day == 0 {
                    index.insert(
                        (voyage.vessel.clone(), voyage.cargo.clone()),
                        sweep.thresholds.len(),
                    );
                    feasible_at_zero.push(voyage.can_make_laycan);
                    sweep.thresholds.push(PairThreshold {
                        vessel: voyage.vessel,
                        cargo: voyage.cargo,
                        flip_delay_days: None,
                    });
                    continue;
                }
                if voyage.can_make_laycan {
                    continue;
                }
                let Some(&i) = index.get(&(voyage.vessel, voyage.cargo)) else {
                    continue;
                };
                let threshold = &mut sweep.thresholds[i];
                if feasible_at_zero[i] && threshold.flip_delay_days.is_none() {
                    threshold.flip_delay_days = Some(delay);
                }
            }
        }
        Ok(sweep)
    }
}
