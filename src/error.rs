//! Error taxonomy shared by every component.
//!
//! Infeasible voyages are never errors: a missed laycan is reported through
//! [`VoyageResult::can_make_laycan`](crate::models::VoyageResult).

use std::fmt;

use thiserror::Error;

/// The kind of entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A vessel in the fleet.
    Vessel,
    /// A cargo lot.
    Cargo,
    /// A port known to the delay model.
    Port,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Vessel => "vessel",
            EntityKind::Cargo => "cargo",
            EntityKind::Port => "port",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the voyage engine and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoyageError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("reference data unavailable: {0}")]
    DataUnavailable(String),

    #[error("validation failed for field {field}: {message}")]
    Validation { field: String, message: String },

    #[error("delay model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("chat generation failed: {0}")]
    UpstreamGeneration(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to load {path}: {reason}")]
    Dataset { path: String, reason: String },

    #[error("failed to encode output: {0}")]
    Encode(String),
}

impl VoyageError {
    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        VoyageError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        VoyageError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for VoyageError {
    fn from(err: config::ConfigError) -> Self {
        VoyageError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VoyageError {
    fn from(err: serde_json::Error) -> Self {
        VoyageError::Encode(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VoyageError>;
