//! Error types.
//!
//! Two failure channels exist. Problems with the inputs or configuration
//! are fatal and surface as [`RosterError`] before any shift is processed.
//! Coverage shortfalls are not errors at all: they are recorded in
//! [`Statistics`](crate::scheduler::Statistics) and the run continues.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Top-level error for a scheduling run.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registrar or shift records failed structural validation.
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML was malformed or a required key was missing.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A numeric limit is out of range.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// A shift type was referenced but not defined.
    #[error("Unknown shift type '{0}'")]
    UnknownShiftType(String),

    /// No staffing level is configured for a shift type.
    #[error("No min_registrars_per_shift entry for shift type '{0}'")]
    MissingStaffingLevel(String),
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T, E = RosterError> = std::result::Result<T, E>;
