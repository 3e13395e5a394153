//! Runtime settings loaded through the `config` crate.
//!
//! Precedence: environment (`UVOYAGE__SECTION__KEY`) over the optional
//! settings file over built-in defaults.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{Result, VoyageError};

/// Cost assumptions applied to every voyage.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CostSettings {
    /// Fixed operating overhead charged to each voyage, in $.
    #[serde(default = "default_misc_overhead")]
    pub misc_overhead: f64,
    /// Maximum detour, as a fraction of the direct leg, for a bunkering hub
    /// to count as lying along the route.
    #[serde(default = "default_bunker_deviation_tolerance")]
    pub bunker_deviation_tolerance: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            misc_overhead: default_misc_overhead(),
            bunker_deviation_tolerance: default_bunker_deviation_tolerance(),
        }
    }
}

impl CostSettings {
    /// Sets the per-voyage overhead.
    pub fn with_misc_overhead(mut self, overhead: f64) -> Self {
        self.misc_overhead = overhead;
        self
    }

    /// Sets the bunkering detour tolerance.
    pub fn with_bunker_deviation_tolerance(mut self, tolerance: f64) -> Self {
        self.bunker_deviation_tolerance = tolerance;
        self
    }
}

/// Port delay prediction settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PredictionSettings {
    /// Predicted delay (days) from which congestion counts as medium.
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold_days: f64,
    /// Predicted delay (days) from which congestion counts as high.
    #[serde(default = "default_high_threshold")]
    pub high_threshold_days: f64,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            medium_threshold_days: default_medium_threshold(),
            high_threshold_days: default_high_threshold(),
        }
    }
}

/// Chat streaming settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChatSettings {
    /// Capacity of the fragment channel between generator and consumer.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Tipping-point search range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScenarioSettings {
    /// Highest bunker multiplier probed when searching for a tipping point.
    #[serde(default = "default_tipping_bunker_max")]
    pub tipping_bunker_max: f64,
    #[serde(default = "default_tipping_bunker_steps")]
    pub tipping_bunker_steps: usize,
    /// Longest extra port delay, in whole days, probed for a tipping point.
    #[serde(default = "default_tipping_delay_max_days")]
    pub tipping_delay_max_days: u32,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            tipping_bunker_max: default_tipping_bunker_max(),
            tipping_bunker_steps: default_tipping_bunker_steps(),
            tipping_delay_max_days: default_tipping_delay_max_days(),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// Trained delay model artifact; prediction is unavailable without it.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub costs: CostSettings,
    #[serde(default)]
    pub prediction: PredictionSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub scenario: ScenarioSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            model_path: None,
            costs: CostSettings::default(),
            prediction: PredictionSettings::default(),
            chat: ChatSettings::default(),
            scenario: ScenarioSettings::default(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Loads settings from an optional file plus the environment.
    ///
    /// Without a path, a `voyage.{toml,json,yaml}` in the working directory
    /// is used when present.
    pub fn load_with_path(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => builder.add_source(File::with_name("voyage").required(false)),
        };
        builder = builder.add_source(
            Environment::with_prefix("UVOYAGE")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from the default locations.
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.costs.misc_overhead.is_finite() || self.costs.misc_overhead < 0.0 {
            return Err(VoyageError::Config("costs.misc_overhead must be non-negative".into()));
        }
        let tol = self.costs.bunker_deviation_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(VoyageError::Config(
                "costs.bunker_deviation_tolerance must be non-negative".into(),
            ));
        }
        let p = &self.prediction;
        if !(p.medium_threshold_days >= 0.0 && p.medium_threshold_days <= p.high_threshold_days) {
            return Err(VoyageError::Config(
                "prediction thresholds must satisfy 0 <= medium <= high".into(),
            ));
        }
        if self.chat.channel_capacity == 0 {
            return Err(VoyageError::Config("chat.channel_capacity must be at least 1".into()));
        }
        let sc = &self.scenario;
        if !(sc.tipping_bunker_max.is_finite() && sc.tipping_bunker_max >= 1.0) || sc.tipping_bunker_steps < 2 {
            return Err(VoyageError::Config(
                "scenario tipping search needs bunker_max >= 1 and at least 2 steps".into(),
            ));
        }
        Ok(())
    }
}

fn default_misc_overhead() -> f64 {
    15_000.0
}

fn default_bunker_deviation_tolerance() -> f64 {
    0.05
}

fn default_medium_threshold() -> f64 {
    2.0
}

fn default_high_threshold() -> f64 {
    5.0
}

fn default_channel_capacity() -> usize {
    64
}

fn default_tipping_bunker_max() -> f64 {
    2.0
}

fn default_tipping_bunker_steps() -> usize {
    101
}

fn default_tipping_delay_max_days() -> u32 {
    15
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/fleet.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.costs.misc_overhead, 15_000.0);
        assert_eq!(s.costs.bunker_deviation_tolerance, 0.05);
        assert_eq!(s.prediction.medium_threshold_days, 2.0);
        assert_eq!(s.chat.channel_capacity, 64);
        assert_eq!(s.scenario.tipping_bunker_steps, 101);
        assert!(s.model_path.is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "dataset_path = \"fleet.json\"\nmodel_path = \"delay_model.json\"\n\n[costs]\nmisc_overhead = 20000.0\n\n[prediction]\nhigh_threshold_days = 6.5"
        )
        .expect("write");

        let s = Settings::load_with_path(Some(file.path())).expect("loads");
        assert_eq!(s.dataset_path, PathBuf::from("fleet.json"));
        assert_eq!(s.model_path, Some(PathBuf::from("delay_model.json")));
        assert_eq!(s.costs.misc_overhead, 20_000.0);
        assert_eq!(s.costs.bunker_deviation_tolerance, 0.05);
        assert_eq!(s.prediction.high_threshold_days, 6.5);
        assert_eq!(s.prediction.medium_threshold_days, 2.0);
    }

    #[test]
    fn test_missing_required_file() {
        let err = Settings::load_with_path(Some(Path::new("/nonexistent/voyage.toml")))
            .expect_err("missing file");
        assert!(matches!(err, VoyageError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut s = Settings::default();
        s.prediction.medium_threshold_days = 8.0;
        assert!(matches!(s.validate(), Err(VoyageError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut s = Settings::default();
        s.chat.channel_capacity = 0;
        assert!(s.validate().is_err());
    }
}
