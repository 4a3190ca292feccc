//! Closed-form steady-state values for the M/M/1 queue
//!
//! Used as a reference when judging a simulated run. All steady-state
//! quantities exist only for ρ = λ/μ < 1; for an overloaded queue they are
//! `None` rather than a negative or infinite number.

use queuesim_core::SimulationConfig;
use serde::Serialize;

use crate::error::MetricsError;

/// Analytic M/M/1 model for rates λ and μ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mm1Theory {
    arrival_rate: f64,
    service_rate: f64,
}

impl Mm1Theory {
    pub fn new(arrival_rate: f64, service_rate: f64) -> Result<Self, MetricsError> {
        for (name, rate) in [("arrival_rate", arrival_rate), ("service_rate", service_rate)] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(MetricsError::InvalidParameter(format!(
                    "{name} must be finite and positive, got {rate}"
                )));
            }
        }
        Ok(Self {
            arrival_rate,
            service_rate,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, MetricsError> {
        Self::new(config.arrival_rate, config.service_rate)
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Traffic intensity ρ = λ/μ
    pub fn traffic_intensity(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// Check if system is stable (ρ < 1)
    pub fn is_stable(&self) -> bool {
        self.traffic_intensity() < 1.0
    }

    /// Long-run fraction of time the server is busy
    pub fn utilization(&self) -> Option<f64> {
        self.is_stable().then(|| self.traffic_intensity())
    }

    /// Wq = λ / (μ(μ − λ))
    pub fn expected_wait(&self) -> Option<f64> {
        self.is_stable().then(|| {
            self.arrival_rate / (self.service_rate * (self.service_rate - self.arrival_rate))
        })
    }

    /// W = 1 / (μ − λ)
    pub fn expected_system_time(&self) -> Option<f64> {
        self.is_stable()
            .then(|| 1.0 / (self.service_rate - self.arrival_rate))
    }

    /// Lq = ρ² / (1 − ρ)
    pub fn expected_queue_length(&self) -> Option<f64> {
        let rho = self.traffic_intensity();
        self.is_stable().then(|| rho * rho / (1.0 - rho))
    }

    /// L = ρ / (1 − ρ)
    pub fn expected_in_system(&self) -> Option<f64> {
        let rho = self.traffic_intensity();
        self.is_stable().then(|| rho / (1.0 - rho))
    }

    /// P(wait > t) = ρ·e^(−(μ − λ)t) for t ≥ 0
    pub fn wait_exceeds(&self, t: f64) -> Option<f64> {
        if t < 0.0 {
            return Some(1.0);
        }
        let rho = self.traffic_intensity();
        self.is_stable()
            .then(|| rho * (-(self.service_rate - self.arrival_rate) * t).exp())
    }
}
