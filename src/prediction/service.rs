//! Port delay predictions served from a loaded model.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DelayModel, ModelInfo};
use crate::error::{EntityKind, Result, VoyageError};
use crate::reference::PortFeatures;
use crate::settings::PredictionSettings;

/// Ordered congestion bands for a predicted delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    /// Maps a delay in days onto the configured bands.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_voyage::prediction::CongestionLevel;
    /// use u_voyage::settings::PredictionSettings;
    ///
    /// let bands = PredictionSettings::default();
    /// assert_eq!(CongestionLevel::from_delay(1.9, &bands), CongestionLevel::Low);
    /// assert_eq!(CongestionLevel::from_delay(2.0, &bands), CongestionLevel::Medium);
    /// assert_eq!(CongestionLevel::from_delay(5.0, &bands), CongestionLevel::High);
    /// ```
    pub fn from_delay(days: f64, settings: &PredictionSettings) -> Self {
        if days >= settings.high_threshold_days {
            CongestionLevel::High
        } else if days >= settings.medium_threshold_days {
            CongestionLevel::Medium
        } else {
            CongestionLevel::Low
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CongestionLevel::Low => "low",
            CongestionLevel::Medium => "medium",
            CongestionLevel::High => "high",
        };
        f.write_str(label)
    }
}

/// Predicted extra waiting time at one port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDelayPrediction {
    pub port: String,
    pub predicted_delay_days: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub congestion_level: CongestionLevel,
    pub model_used: String,
}

/// Serves delay predictions for the ports in the feature table.
///
/// A service may be built without a usable model, in which case every
/// prediction call fails with [`VoyageError::ModelUnavailable`] carrying
/// the load failure.
#[derive(Debug, Clone)]
pub struct PortDelayService {
    model: std::result::Result<DelayModel, String>,
    features: PortFeatures,
    settings: PredictionSettings,
}

impl PortDelayService {
    /// Creates a service around a loaded model.
    pub fn new(model: DelayModel, features: PortFeatures, settings: PredictionSettings) -> Self {
        Self {
            model: Ok(model),
            features,
            settings,
        }
    }

    /// Creates a service whose model could not be loaded.
    pub fn unavailable(reason: impl Into<String>, features: PortFeatures, settings: PredictionSettings) -> Self {
        Self {
            model: Err(reason.into()),
            features,
            settings,
        }
    }

    /// Loads the artifact at `path`, degrading to an unavailable service on
    /// any failure.
    pub fn load(path: Option<&Path>, features: PortFeatures, settings: PredictionSettings) -> Self {
        let Some(path) = path else {
            tracing::info!("no delay model configured; predictions disabled");
            return Self::unavailable("no model artifact configured", features, settings);
        };
        match DelayModel::load(path) {
            Ok(model) => Self::new(model, features, settings),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "delay model failed to load");
                let reason = match e {
                    VoyageError::ModelUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                Self::unavailable(reason, features, settings)
            }
        }
    }

    /// Whether a model is loaded.
    pub fn is_available(&self) -> bool {
        self.model.is_ok()
    }

    fn model(&self) -> Result<&DelayModel> {
        self.model
            .as_ref()
            .map_err(|reason| VoyageError::ModelUnavailable(reason.clone()))
    }

    fn prediction(&self, model: &DelayModel, port: &str, features: &BTreeMap<String, f64>) -> Result<PortDelayPrediction> {
        let point = model.predict(features)?;
        let half_width = model.interval_half_width();
        Ok(PortDelayPrediction {
            port: port.to_string(),
            predicted_delay_days: point,
            confidence_lower: (point - half_width).max(0.0),
            confidence_upper: point + half_width,
            congestion_level: CongestionLevel::from_delay(point, &self.settings),
            model_used: model.model_type().to_string(),
        })
    }

    /// Predicts the delay at `port`.
    pub fn predict(&self, port: &str) -> Result<PortDelayPrediction> {
        let model = self.model()?;
        let features = self
            .features
            .get(port)
            .ok_or_else(|| VoyageError::not_found(EntityKind::Port, port))?;
        self.prediction(model, port, features)
    }

    /// Predicts every port in the feature table, in port name order.
    ///
    /// Ports lacking a feature the model needs are skipped.
    pub fn predict_all(&self) -> Result<Vec<PortDelayPrediction>> {
        let model = self.model()?;
        let mut predictions = Vec::with_capacity(self.features.len());
        for (port, features) in &self.features {
            match self.prediction(model, port, features) {
                Ok(p) => predictions.push(p),
                Err(e) => tracing::warn!(port = %port, error = %e, "port skipped"),
            }
        }
        Ok(predictions)
    }

    /// Metadata of the loaded model.
    pub fn model_info(&self) -> Result<ModelInfo> {
        Ok(self.model()?.info())
    }
}
