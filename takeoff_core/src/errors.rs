//! # Error Types
//!
//! Structured error types for takeoff_core. Only caller mistakes are errors:
//! unreadable room geometry and missing price points are reported as skipped
//! rooms and omitted materials on the returned records instead.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_contingency(percent: f64) -> EstimateResult<()> {
//!     if !(percent >= 0.0) {
//!         return Err(EstimateError::invalid_config(
//!             "contingency_percent",
//!             percent.to_string(),
//!             "Contingency must be zero or positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_contingency(-0.1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for takeoff and estimating operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (non-positive dimension, NaN, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A configuration value is unknown or out of range
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    /// Material key not present in a catalog
    #[error("Unknown material: {key}")]
    UnknownMaterial { key: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(key: impl Into<String>) -> Self {
        EstimateError::UnknownMaterial { key: key.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::InvalidConfig { .. } => "INVALID_CONFIG",
            EstimateError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            EstimateError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        EstimateError::Serialization {
            reason: err.to_string(),
        }
    }
}
