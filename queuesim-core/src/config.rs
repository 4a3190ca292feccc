//! Simulator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{check_rate, SimError};

/// Number of leading waits kept for inspection and plotting
pub const WAIT_SAMPLE_CAP: usize = 5000;

/// Largest accepted `sample_cap`; keeps a run's memory bounded for any `n`
pub const MAX_SAMPLE_CAP: usize = 1_000_000;

/// Parameters of one M/M/1 simulator instance
///
/// Fixed for the lifetime of a [`QueueSimulator`](crate::QueueSimulator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Arrival rate λ (customers per unit time)
    pub arrival_rate: f64,
    /// Service rate μ (customers per unit time)
    pub service_rate: f64,
    /// Explicit seed; `None` seeds from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound on the length of `wait_samples`
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,
}

fn default_sample_cap() -> usize {
    WAIT_SAMPLE_CAP
}

impl SimulationConfig {
    /// Config for rates λ and μ, entropy seeded, default sample cap
    pub fn new(arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            arrival_rate,
            service_rate,
            seed: None,
            sample_cap: WAIT_SAMPLE_CAP,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sample_cap(mut self, sample_cap: usize) -> Self {
        self.sample_cap = sample_cap;
        self
    }

    /// Offered load ρ = λ/μ
    pub fn traffic_intensity(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// Check if the queue has a steady state (ρ < 1)
    pub fn is_stable(&self) -> bool {
        self.traffic_intensity() < 1.0
    }

    /// Reject non-positive or non-finite rates and oversized sample caps
    pub fn validate(&self) -> Result<(), SimError> {
        check_rate("arrival_rate", self.arrival_rate)?;
        check_rate("service_rate", self.service_rate)?;
        if self.sample_cap > MAX_SAMPLE_CAP {
            return Err(SimError::invalid(
                "sample_cap",
                format!("must be at most {MAX_SAMPLE_CAP}, got {}", self.sample_cap),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SimError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }
}
