//! Output records of a simulator run

use serde::{Deserialize, Serialize};

/// Aggregate results of one `run`
///
/// Aggregates cover every simulated customer; `wait_samples` only holds the
/// first `min(n, sample_cap)` waits, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Number of customers simulated (the requested `n`)
    pub total_customers: u64,
    /// Mean time spent queueing before service
    pub avg_wait: f64,
    /// Mean time from arrival to departure
    pub avg_system_time: f64,
    /// Busy time divided by the last customer's departure time
    pub utilization: f64,
    /// Leading waits for inspection and plotting
    pub wait_samples: Vec<f64>,
}

impl SimulationResult {
    /// Mean service duration implied by the aggregates
    pub fn avg_service_time(&self) -> f64 {
        self.avg_system_time - self.avg_wait
    }
}

/// Trajectory of a single customer through the queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Zero-based position in arrival order
    pub index: u64,
    pub arrival: f64,
    pub service_start: f64,
    pub wait: f64,
    pub service_duration: f64,
    pub system_time: f64,
    /// Also the time the server becomes free again
    pub departure: f64,
}
