//! Trained delay model artifact.
//!
//! The artifact is a JSON document describing a linear regression over
//! named port features:
//!
//! ```json
//! {
//!   "model_type": "LinearRegression",
//!   "training_date": "2026-01-15",
//!   "metrics": { "mae": 1.21, "r2": 0.78 },
//!   "intercept": 0.4,
//!   "coefficients": { "vessel_queue": 0.09, "berth_utilization": 3.1 },
//!   "residual_std": 1.3,
//!   "interval_z": 1.96,
//!   "feature_importance": [ { "feature": "vessel_queue", "importance": 0.62 } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageError};

/// Contribution of one feature to the model's predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Descriptive metadata of the loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub training_date: String,
    pub metrics: BTreeMap<String, f64>,
    /// Ordered by descending importance.
    pub feature_importance: Vec<FeatureImportance>,
}

fn default_interval_z() -> f64 {
    1.96
}

/// A linear port delay model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayModel {
    model_type: String,
    training_date: String,
    #[serde(default)]
    metrics: BTreeMap<String, f64>,
    intercept: f64,
    coefficients: BTreeMap<String, f64>,
    residual_std: f64,
    #[serde(default = "default_interval_z")]
    interval_z: f64,
    #[serde(default)]
    feature_importance: Vec<FeatureImportance>,
}

impl DelayModel {
    /// Creates a model from its regression terms.
    pub fn new(
        model_type: impl Into<String>,
        intercept: f64,
        coefficients: BTreeMap<String, f64>,
        residual_std: f64,
    ) -> Self {
        Self {
            model_type: model_type.into(),
            training_date: String::new(),
            metrics: BTreeMap::new(),
            intercept,
            coefficients,
            residual_std,
            interval_z: default_interval_z(),
            feature_importance: Vec::new(),
        }
    }

    pub fn with_training_date(mut self, date: impl Into<String>) -> Self {
        self.training_date = date.into();
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn with_interval_z(mut self, z: f64) -> Self {
        self.interval_z = z;
        self
    }

    pub fn with_feature_importance(mut self, feature: impl Into<String>, importance: f64) -> Self {
        self.feature_importance.push(FeatureImportance {
            feature: feature.into(),
            importance,
        });
        self
    }

    /// Reads and validates an artifact file.
    ///
    /// Any failure is reported as [`VoyageError::ModelUnavailable`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| VoyageError::ModelUnavailable(format!("{}: {e}", path.display())))?;
        let model = Self::from_json(&raw)
            .map_err(|e| VoyageError::ModelUnavailable(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            model_type = %model.model_type,
            features = model.coefficients.len(),
            "delay model loaded"
        );
        Ok(model)
    }

    /// Parses and validates an artifact from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let model: DelayModel =
            serde_json::from_str(raw).map_err(|e| VoyageError::ModelUnavailable(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Rejects artifacts whose terms would produce meaningless estimates.
    pub fn validate(&self) -> Result<()> {
        if !self.intercept.is_finite() || self.coefficients.values().any(|c| !c.is_finite()) {
            return Err(VoyageError::ModelUnavailable("non-finite regression term".into()));
        }
        if !self.residual_std.is_finite() || self.residual_std < 0.0 {
            return Err(VoyageError::ModelUnavailable("residual_std must be non-negative".into()));
        }
        if !self.interval_z.is_finite() || self.interval_z <= 0.0 {
            return Err(VoyageError::ModelUnavailable("interval_z must be positive".into()));
        }
        Ok(())
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    /// Half-width of the confidence interval, in days.
    pub fn interval_half_width(&self) -> f64 {
        self.interval_z * self.residual_std
    }

    /// Point estimate for one feature vector, clamped at zero days.
    ///
    /// Every feature with a coefficient must be present; extra features
    /// are ignored.
    pub fn predict(&self, features: &BTreeMap<String, f64>) -> Result<f64> {
        let mut estimate = self.intercept;
        for (name, coef) in &self.coefficients {
            let value = features
                .get(name)
                .ok_or_else(|| VoyageError::DataUnavailable(format!("missing port feature {name}")))?;
            estimate += coef * value;
        }
        Ok(estimate.max(0.0))
    }

    /// Model metadata, with feature importance sorted descending.
    pub fn info(&self) -> ModelInfo {
        let mut feature_importance = self.feature_importance.clone();
        feature_importance.sort_by(|a, b| {
            b.importance
                .total_cmp(&a.importance)
                .then_with(|| a.feature.cmp(&b.feature))
        });
        ModelInfo {
            model_type: self.model_type.clone(),
            training_date: self.training_date.clone(),
            metrics: self.metrics.clone(),
            feature_importance,
        }
    }
}
