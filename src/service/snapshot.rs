//! Immutable fleet snapshot and its atomically swappable holder.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::calculator::VoyageCalculator;
use crate::error::{EntityKind, Result, VoyageError};
use crate::models::{Cargo, PortfolioResult, Vessel, VoyageParams, VoyageResult};
use crate::optimizer::PortfolioOptimizer;
use crate::prediction::PortDelayService;
use crate::reference::{FleetDataset, ReferenceTables};
use crate::scenario::ScenarioEngine;
use crate::settings::{CostSettings, Settings};

/// Everything computed once from a fleet dataset.
///
/// Never mutated after construction; readers share it through an `Arc`.
#[derive(Debug)]
pub struct FleetSnapshot {
    vessels: Vec<Vessel>,
    cargoes: Vec<Cargo>,
    tables: ReferenceTables,
    costs: CostSettings,
    portfolio: PortfolioResult,
    voyages: Vec<VoyageResult>,
    delays: PortDelayService,
    built_at: DateTime<Utc>,
}

impl FleetSnapshot {
    /// Validates `dataset`, loads the configured delay model and optimizes
    /// the portfolio.
    pub fn build(dataset: FleetDataset, settings: &Settings) -> Result<Self> {
        let delays = PortDelayService::load(
            settings.model_path.as_deref(),
            dataset.port_features.clone(),
            settings.prediction,
        );
        Self::with_delays(dataset, settings.costs, delays)
    }

    /// Like [`build`](Self::build) but with an already constructed delay
    /// service.
    pub fn with_delays(dataset: FleetDataset, costs: CostSettings, delays: PortDelayService) -> Result<Self> {
        dataset.validate()?;
        let tables = dataset.reference_tables();
        let optimizer = PortfolioOptimizer::new(VoyageCalculator::new(&tables, costs));
        let (portfolio, voyages) =
            optimizer.optimize_detailed(&dataset.vessels, &dataset.cargoes, &VoyageParams::default())?;

        Ok(Self {
            vessels: dataset.vessels,
            cargoes: dataset.cargoes,
            tables,
            costs,
            portfolio,
            voyages,
            delays,
            built_at: Utc::now(),
        })
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn cargoes(&self) -> &[Cargo] {
        &self.cargoes
    }

    /// The optimal portfolio at default voyage parameters.
    pub fn portfolio(&self) -> &PortfolioResult {
        &self.portfolio
    }

    /// Every pair's voyage at default parameters, by vessel then cargo.
    pub fn all_voyages(&self) -> &[VoyageResult] {
        &self.voyages
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn costs(&self) -> &CostSettings {
        &self.costs
    }

    pub fn delays(&self) -> &PortDelayService {
        &self.delays
    }

    /// When this snapshot was computed.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn vessel(&self, name: &str) -> Result<&Vessel> {
        self.vessels
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| VoyageError::not_found(EntityKind::Vessel, name))
    }

    pub fn cargo(&self, name: &str) -> Result<&Cargo> {
        self.cargoes
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| VoyageError::not_found(EntityKind::Cargo, name))
    }

    pub fn calculator(&self) -> VoyageCalculator<'_, ReferenceTables> {
        VoyageCalculator::new(&self.tables, self.costs)
    }

    pub fn optimizer(&self) -> PortfolioOptimizer<'_, ReferenceTables> {
        PortfolioOptimizer::new(self.calculator())
    }

    pub fn scenarios(&self) -> ScenarioEngine<'_, ReferenceTables> {
        ScenarioEngine::new(self.optimizer(), &self.vessels, &self.cargoes)
    }
}

/// Holds the current snapshot and swaps it atomically.
///
/// Readers clone the `Arc` under a brief read lock and then work lock-free;
/// a replacement is visible to every later `load` and never partially.
#[derive(Debug)]
pub struct SnapshotCell {
    current: RwLock<Arc<FleetSnapshot>>,
}

impl SnapshotCell {
    pub fn new(snapshot: FleetSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<FleetSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Installs `next` and returns the snapshot it replaced.
    pub fn replace(&self, next: FleetSnapshot) -> Arc<FleetSnapshot> {
        std::mem::replace(&mut *self.current.write(), Arc::new(next))
    }
}
