//! Error types for analysis and export

use queuesim_core::SimError;
use thiserror::Error;

/// Errors raised while analysing or exporting simulation results
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Sample is empty")]
    EmptySample,

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Replication worker panicked")]
    WorkerPanicked,

    #[error("Export error: {0}")]
    ExportError(String),
}
