//! Error types for the queue simulator

use thiserror::Error;

/// Top-level error type for simulator construction and runs
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Entropy source unavailable: {0}")]
    Entropy(#[from] rand::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns true for [`SimError::InvalidParameter`]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SimError::InvalidParameter { .. })
    }
}

/// Reject rates that would not define an exponential distribution
pub(crate) fn check_rate(name: &'static str, rate: f64) -> Result<f64, SimError> {
    if !rate.is_finite() {
        return Err(SimError::invalid(name, format!("must be finite, got {rate}")));
    }
    if rate <= 0.0 {
        return Err(SimError::invalid(name, format!("must be positive, got {rate}")));
    }
    Ok(rate)
}
