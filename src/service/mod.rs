//! Service facade over the cached fleet snapshot.
//!
//! - [`FleetService`] — Every query operation, with validated request types
//! - [`FleetSnapshot`] / [`SnapshotCell`] — Immutable results computed at
//!   initialization, swapped atomically on refresh
//! - [`VoyageCalcRequest`], [`ScenarioRequest`] and friends — JSON request
//!   and response schemas

mod requests;
mod snapshot;

pub use requests::{
    PortDelayScenarioRequest, ScenarioRequest, VoyageCalcRequest, VoyageCompareRequest,
    VoyageComparison, MAX_EXTRA_PORT_DELAY_DAYS, MAX_SCENARIO_DELAY_DAYS, MAX_SCENARIO_STEPS,
};
pub use snapshot::{FleetSnapshot, SnapshotCell};

use std::sync::Arc;

use crate::chat::{collect_chat, spawn_chat, ChatContext, ChatGenerator, ChatRequest, ChatStream, SnapshotBriefing};
use crate::error::Result;
use crate::models::{Cargo, PortfolioResult, Vessel, VoyageResult};
use crate::prediction::{ModelInfo, PortDelayPrediction};
use crate::reference::FleetDataset;
use crate::scenario::{DelaySweep, ScenarioPoint, TippingPoint};
use crate::settings::Settings;

/// The voyage engine as a long-lived service.
///
/// Initialization loads the dataset and delay model and optimizes the
/// portfolio once; every query afterwards reads the shared snapshot or
/// computes fresh per-call results. All methods take `&self` and the
/// service is `Send + Sync`.
pub struct FleetService {
    cell: SnapshotCell,
    settings: Settings,
    generator: Arc<dyn ChatGenerator>,
}

impl FleetService {
    /// Loads the dataset named in `settings` and builds the first snapshot.
    pub fn initialize(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let dataset = FleetDataset::load(&settings.dataset_path)?;
        Self::from_dataset(dataset, settings)
    }

    /// Builds the service from an in-memory dataset.
    pub fn from_dataset(dataset: FleetDataset, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let snapshot = FleetSnapshot::build(dataset, &settings)?;
        let portfolio = snapshot.portfolio();
        tracing::info!(
            vessels = snapshot.vessels().len(),
            cargoes = snapshot.cargoes().len(),
            assignments = portfolio.num_assignments(),
            total_profit = portfolio.total_profit,
            delay_model = snapshot.delays().is_available(),
            "fleet service initialized"
        );
        Ok(Self {
            cell: SnapshotCell::new(snapshot),
            settings,
            generator: Arc::new(SnapshotBriefing),
        })
    }

    /// Replaces the chat generator.
    pub fn with_generator(mut self, generator: Arc<dyn ChatGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<FleetSnapshot> {
        self.cell.load()
    }

    /// Recomputes everything from `dataset` and swaps it in.
    ///
    /// On failure the current snapshot stays in place.
    pub fn refresh(&self, dataset: FleetDataset) -> Result<()> {
        let next = FleetSnapshot::build(dataset, &self.settings)?;
        let previous = self.cell.replace(next);
        tracing::info!(previous_built_at = %previous.built_at(), "fleet snapshot refreshed");
        Ok(())
    }

    pub fn vessels(&self) -> Vec<Vessel> {
        self.snapshot().vessels().to_vec()
    }

    pub fn cargoes(&self) -> Vec<Cargo> {
        self.snapshot().cargoes().to_vec()
    }

    /// The cached optimal portfolio.
    pub fn portfolio(&self) -> PortfolioResult {
        self.snapshot().portfolio().clone()
    }

    /// Every cached pair voyage at default parameters.
    pub fn all_voyages(&self) -> Vec<VoyageResult> {
        self.snapshot().all_voyages().to_vec()
    }

    /// Computes one voyage under the requested parameters.
    pub fn calculate(&self, request: &VoyageCalcRequest) -> Result<VoyageResult> {
        let params = request.params()?;
        let snapshot = self.snapshot();
        let vessel = snapshot.vessel(&request.vessel_name)?;
        let cargo = snapshot.cargo(&request.cargo_name)?;
        snapshot.calculator().compute(vessel, cargo, &params)
    }

    /// Computes each requested voyage; fails on the first bad pair.
    pub fn compare(&self, request: &VoyageCompareRequest) -> Result<VoyageComparison> {
        let voyages = request
            .pairs
            .iter()
            .map(|pair| self.calculate(pair))
            .collect::<Result<Vec<_>>>()?;
        Ok(VoyageComparison { voyages })
    }

    pub fn bunker_scenario(&self, request: &ScenarioRequest) -> Result<Vec<ScenarioPoint>> {
        request.validate()?;
        self.snapshot()
            .scenarios()
            .bunker_sweep(request.parameter_min, request.parameter_max, request.steps)
    }

    pub fn port_delay_scenario(&self, request: &PortDelayScenarioRequest) -> Result<DelaySweep> {
        let max_delay = request.max_delay()?;
        self.snapshot().scenarios().port_delay_sweep(max_delay)
    }

    /// Bunker price and port delay tipping points, where found within the
    /// configured search range.
    pub fn tipping_points(&self) -> Result<Vec<TippingPoint>> {
        let search = &self.settings.scenario;
        let snapshot = self.snapshot();
        let engine = snapshot.scenarios();
        let bunker = engine.bunker_tipping_point(search.tipping_bunker_max, search.tipping_bunker_steps)?;
        let delay = engine.delay_tipping_point(search.tipping_delay_max_days)?;
        Ok(bunker.into_iter().chain(delay).collect())
    }

    pub fn port_delay(&self, port: &str) -> Result<PortDelayPrediction> {
        self.snapshot().delays().predict(port)
    }

    pub fn port_delays(&self) -> Result<Vec<PortDelayPrediction>> {
        self.snapshot().delays().predict_all()
    }

    pub fn model_info(&self) -> Result<ModelInfo> {
        self.snapshot().delays().model_info()
    }

    /// Starts a streamed chat response.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn chat(&self, request: ChatRequest) -> Result<ChatStream> {
        request.validate()?;
        let context = ChatContext::new(self.snapshot());
        Ok(spawn_chat(
            Arc::clone(&self.generator),
            request,
            context,
            self.settings.chat.channel_capacity,
        ))
    }

    /// Runs a chat to completion and returns the whole response.
    pub async fn chat_sync(&self, request: ChatRequest) -> Result<String> {
        let stream = self.chat(request)?;
        collect_chat(stream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatEvent;
    use crate::error::{EntityKind, VoyageError};
    use crate::prediction::CongestionLevel;
    use std::io::Write;

    const FLEET: &str = r#"{
        "vessels": [
            {
                "name": "Ann Bell", "dwt": 180803, "hire_rate": 11750,
                "speed_laden": 13.5, "speed_laden_eco": 12.0,
                "speed_ballast": 14.5, "speed_ballast_eco": 12.5,
                "current_port": "Kamsar", "etd": "2026-03-01"
            },
            {
                "name": "Ocean Horizon", "dwt": 181550, "hire_rate": 15750,
                "speed_laden": 13.8, "speed_laden_eco": 12.3,
                "speed_ballast": 14.8, "speed_ballast_eco": 12.8,
                "current_port": "Qingdao", "etd": "2026-03-01"
            }
        ],
        "cargoes": [{
            "name": "EGA Bauxite", "customer": "EGA", "commodity": "Bauxite",
            "quantity": 180000, "laycan_start": "2026-03-05", "laycan_end": "2026-03-15",
            "freight_rate": 23.0, "load_port": "Kamsar", "discharge_port": "Qingdao",
            "load_rate": 30000, "discharge_rate": 25000, "commission": 0.0125
        }],
        "distances": [{"from": "Kamsar", "to": "Qingdao", "distance": 11124}],
        "consumption": {
            "Ann Bell": {
                "ballast": {"vlsfo": 38, "mgo": 2}, "ballast_eco": {"vlsfo": 30, "mgo": 2},
                "laden": {"vlsfo": 42, "mgo": 2}, "laden_eco": {"vlsfo": 34, "mgo": 2}
            },
            "Ocean Horizon": {
                "ballast": {"vlsfo": 39, "mgo": 2}, "ballast_eco": {"vlsfo": 31, "mgo": 2},
                "laden": {"vlsfo": 43, "mgo": 2}, "laden_eco": {"vlsfo": 35, "mgo": 2}
            }
        },
        "bunker_prices": {"vlsfo": 490, "mgo": 650},
        "port_features": {"Qingdao": {"vessel_queue": 40}, "Kamsar": {"vessel_queue": 4}}
    }"#;

    const MODEL: &str = r#"{
        "model_type": "LinearRegression",
        "training_date": "2026-01-15",
        "metrics": {"mae": 1.1},
        "intercept": 0.0,
        "coefficients": {"vessel_queue": 0.15},
        "residual_std": 1.0,
        "feature_importance": [{"feature": "vessel_queue", "importance": 1.0}]
    }"#;

    fn service() -> FleetService {
        let dataset = FleetDataset::from_json(FLEET).expect("valid dataset");
        FleetService::from_dataset(dataset, Settings::default()).expect("initializes")
    }

    #[test]
    fn test_portfolio_cached() {
        let svc = service();
        let portfolio = svc.portfolio();
        // Ocean Horizon sits 11,124 nm away and cannot reach Kamsar by Mar 15
        assert_eq!(
            portfolio.pairs(),
            vec![("Ann Bell".to_string(), "EGA Bauxite".to_string())]
        );
        assert_eq!(portfolio.unassigned_vessels, vec!["Ocean Horizon".to_string()]);
        assert_eq!(svc.all_voyages().len(), 2);
        assert_eq!(svc.vessels().len(), 2);
        assert_eq!(svc.cargoes().len(), 1);
        assert!(Arc::ptr_eq(&svc.snapshot(), &svc.snapshot()));
    }

    #[test]
    fn test_calculate() {
        let svc = service();
        let r = svc
            .calculate(&VoyageCalcRequest::new("Ann Bell", "EGA Bauxite"))
            .expect("computes");
        assert!(r.can_make_laycan);
        assert_eq!(r, svc.portfolio().assignments[0].voyage);
    }

    #[test]
    fn test_calculate_unknown_names() {
        let svc = service();
        let err = svc
            .calculate(&VoyageCalcRequest::new("Ghost", "EGA Bauxite"))
            .expect_err("unknown vessel");
        assert!(matches!(err, VoyageError::NotFound { kind: EntityKind::Vessel, .. }));
        let err = svc
            .calculate(&VoyageCalcRequest::new("Ann Bell", "Ghost"))
            .expect_err("unknown cargo");
        assert!(matches!(err, VoyageError::NotFound { kind: EntityKind::Cargo, .. }));
    }

    #[test]
    fn test_compare_preserves_order() {
        let svc = service();
        let request = VoyageCompareRequest {
            pairs: vec![
                VoyageCalcRequest::new("Ocean Horizon", "EGA Bauxite"),
                VoyageCalcRequest::new("Ann Bell", "EGA Bauxite"),
            ],
        };
        let comparison = svc.compare(&request).expect("computes");
        assert_eq!(comparison.voyages[0].vessel, "Ocean Horizon");
        assert!(!comparison.voyages[0].can_make_laycan);
        assert_eq!(comparison.voyages[1].vessel, "Ann Bell");
    }

    #[test]
    fn test_scenarios() {
        let svc = service();
        let points = svc.bunker_scenario(&ScenarioRequest::default()).expect("valid");
        assert_eq!(points.len(), 15);
        assert!((points[0].parameter_value - 0.8).abs() < 1e-12);
        assert!((points[14].parameter_value - 1.5).abs() < 1e-12);

        let sweep = svc
            .port_delay_scenario(&PortDelayScenarioRequest { max_delay_days: 12 })
            .expect("valid");
        assert_eq!(sweep.points.len(), 13);
        let ann = sweep
            .thresholds
            .iter()
            .find(|t| t.vessel == "Ann Bell")
            .expect("pair present");
        // 14 days from ETD to laycan end, 4 of them already spent waiting
        assert_eq!(ann.flip_delay_days, Some(11.0));

        let err = svc
            .bunker_scenario(&ScenarioRequest {
                parameter_min: 2.0,
                parameter_max: 1.0,
                steps: 3,
            })
            .expect_err("inverted range");
        assert!(matches!(err, VoyageError::Validation { .. }));
    }

    #[test]
    fn test_delay_tipping_point() {
        let svc = service();
        let tips = svc.tipping_points().expect("computes");
        let delay = tips
            .iter()
            .find(|t| t.parameter == crate::scenario::ScenarioParameter::PortDelay)
            .expect("Ann Bell loses the cargo once the laycan is missed");
        assert_eq!(delay.value, 11.0);
        assert!(delay.next_best_assignments.is_empty());
        assert_eq!(delay.current_best_assignments.len(), 1);
    }

    #[test]
    fn test_prediction_without_model() {
        let svc = service();
        assert!(matches!(svc.port_delay("Qingdao"), Err(VoyageError::ModelUnavailable(_))));
        assert!(matches!(svc.model_info(), Err(VoyageError::ModelUnavailable(_))));
    }

    #[test]
    fn test_prediction_with_model() {
        let mut model = tempfile::NamedTempFile::new().expect("temp file");
        model.write_all(MODEL.as_bytes()).expect("write");
        let settings = Settings {
            model_path: Some(model.path().to_path_buf()),
            ..Settings::default()
        };
        let dataset = FleetDataset::from_json(FLEET).expect("valid dataset");
        let svc = FleetService::from_dataset(dataset, settings).expect("initializes");

        let qingdao = svc.port_delay("Qingdao").expect("predicts");
        assert_eq!(qingdao.congestion_level, CongestionLevel::High);
        assert_eq!(svc.port_delays().expect("predicts").len(), 2);
        assert_eq!(svc.model_info().expect("loaded").model_type, "LinearRegression");
        assert!(matches!(
            svc.port_delay("Atlantis"),
            Err(VoyageError::NotFound { kind: EntityKind::Port, .. })
        ));
    }

    #[test]
    fn test_refresh_swaps_snapshot() {
        let svc = service();
        let before = svc.snapshot();
        let mut dataset = FleetDataset::from_json(FLEET).expect("valid dataset");
        dataset.cargoes.clear();
        svc.refresh(dataset).expect("refreshes");

        assert_eq!(before.portfolio().num_assignments(), 1);
        assert_eq!(svc.portfolio().num_assignments(), 0);
        assert_eq!(svc.cargoes().len(), 0);
    }

    #[tokio::test]
    async fn test_chat_streams_briefing() {
        let svc = service();
        let mut stream = svc.chat(ChatRequest::new("How is Ann Bell doing?")).expect("starts");
        let mut text = String::new();
        let mut done = false;
        while let Some(event) = stream.next().await {
            match event {
                ChatEvent::Chunk(c) => text.push_str(&c),
                ChatEvent::Done => done = true,
                ChatEvent::Error(e) => panic!("unexpected error: {e}"),
            }
        }
        assert!(done);
        assert!(text.contains("Ann Bell -> EGA Bauxite"));
    }

    #[tokio::test]
    async fn test_chat_sync_summary() {
        let svc = service();
        let text = svc.chat_sync(ChatRequest::new("Give me an overview")).await.expect("completes");
        assert!(text.starts_with("Portfolio: 1 assignments"));
        assert!(text.contains("Unassigned vessels: Ocean Horizon"));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let svc = service();
        assert!(matches!(svc.chat(ChatRequest::new(" ")), Err(VoyageError::Validation { .. })));
    }
}
