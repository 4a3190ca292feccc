//! Independent replications with normal-approximation confidence intervals
//!
//! A simulator's runs share one random stream, so repeated runs on the same
//! instance are not independent. Each replication here builds its own
//! simulator seeded with `base_seed + i`, which also makes every replication
//! reproducible on its own.

use std::thread;

use queuesim_core::{QueueSimulator, SimulationConfig, SimulationResult};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::MetricsError;
use crate::stats::{mean, sample_variance, z_for_confidence};

#[derive(Debug, Clone)]
pub struct ReplicationConfig {
    /// Customers simulated per replication
    pub customers: i64,
    pub replications: usize,
    pub base_seed: u64,
    pub confidence: f64,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            customers: 10_000,
            replications: 10,
            base_seed: 0,
            confidence: 0.95,
        }
    }
}

impl ReplicationConfig {
    fn validate(&self) -> Result<(), MetricsError> {
        if self.replications < 2 {
            return Err(MetricsError::InvalidParameter(format!(
                "need at least 2 replications for an interval, got {}",
                self.replications
            )));
        }
        z_for_confidence(self.confidence)?;
        Ok(())
    }

    fn seed_for(&self, replication: usize) -> u64 {
        self.base_seed.wrapping_add(replication as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalEstimate {
    pub mean: f64,
    pub std_err: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl IntervalEstimate {
    fn from_values(values: &[f64], z: f64) -> Result<Self, MetricsError> {
        let m = mean(values).ok_or(MetricsError::EmptySample)?;
        let var = sample_variance(values).ok_or(MetricsError::EmptySample)?;
        let std_err = (var / values.len() as f64).sqrt();
        Ok(Self {
            mean: m,
            std_err,
            ci_low: m - z * std_err,
            ci_high: m + z * std_err,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.ci_low..=self.ci_high).contains(&value)
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_high - self.ci_low) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationEstimate {
    pub replications: usize,
    pub customers: u64,
    pub confidence: f64,
    pub avg_wait: IntervalEstimate,
    pub avg_system_time: IntervalEstimate,
    pub utilization: IntervalEstimate,
}

impl ReplicationEstimate {
    fn from_results(
        replication: &ReplicationConfig,
        results: &[SimulationResult],
    ) -> Result<Self, MetricsError> {
        let z = z_for_confidence(replication.confidence)?;

        let estimate = Self {
            replications: results.len(),
            customers: results.first().map_or(0, |r| r.total_customers),
            confidence: replication.confidence,
            avg_wait: IntervalEstimate::from_values(&column(results, |r| r.avg_wait), z)?,
            avg_system_time: IntervalEstimate::from_values(&column(results, |r| r.avg_system_time), z)?,
            utilization: IntervalEstimate::from_values(&column(results, |r| r.utilization), z)?,
        };

        info!(
            replications = estimate.replications,
            avg_wait = estimate.avg_wait.mean,
            avg_wait_half_width = estimate.avg_wait.half_width(),
            utilization = estimate.utilization.mean,
            "Replications completed"
        );
        Ok(estimate)
    }
}

fn column(results: &[SimulationResult], f: impl Fn(&SimulationResult) -> f64) -> Vec<f64> {
    results.iter().map(f).collect()
}

fn run_one(
    config: &SimulationConfig,
    replication: &ReplicationConfig,
    index: usize,
) -> Result<SimulationResult, MetricsError> {
    let seed = replication.seed_for(index);
    debug!(replication = index, seed = seed, "Starting replication");
    let mut sim = QueueSimulator::from_config(&config.clone().with_seed(seed))?;
    Ok(sim.run(replication.customers)?)
}

/// Run the replications one after another
pub fn replicate(
    config: &SimulationConfig,
    replication: &ReplicationConfig,
) -> Result<ReplicationEstimate, MetricsError> {
    replication.validate()?;
    let results = (0..replication.replications)
        .map(|i| run_one(config, replication, i))
        .collect::<Result<Vec<_>, _>>()?;
    ReplicationEstimate::from_results(replication, &results)
}

/// Run the replications on up to `threads` worker threads
///
/// Each worker owns its simulators; seeds and result order are the same as
/// [`replicate`], so both produce identical estimates.
pub fn replicate_parallel(
    config: &SimulationConfig,
    replication: &ReplicationConfig,
    threads: usize,
) -> Result<ReplicationEstimate, MetricsError> {
    replication.validate()?;
    let threads = threads.clamp(1, replication.replications);
    let indices: Vec<usize> = (0..replication.replications).collect();
    let chunk = indices.len().div_ceil(threads);

    let chunked: Vec<Result<Vec<SimulationResult>, MetricsError>> = thread::scope(|scope| {
        let handles: Vec<_> = indices
            .chunks(chunk)
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(|&i| run_one(config, replication, i))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or(Err(MetricsError::WorkerPanicked))
            })
            .collect()
    });

    let mut results = Vec::with_capacity(replication.replications);
    for batch in chunked {
        results.extend(batch?);
    }
    ReplicationEstimate::from_results(replication, &results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ReplicationConfig {
        ReplicationConfig {
            customers: 2_000,
            replications: 6,
            base_seed: 100,
            confidence: 0.95,
        }
    }

    #[test]
    fn test_interval_from_values() {
        let estimate = IntervalEstimate::from_values(&[1.0, 2.0, 3.0], 2.0).unwrap();
        assert_eq!(estimate.mean, 2.0);
        let std_err = (1.0_f64 / 3.0).sqrt();
        assert!((estimate.std_err - std_err).abs() < 1e-12);
        assert!((estimate.half_width() - 2.0 * std_err).abs() < 1e-12);
        assert!(estimate.contains(2.0));
        assert!(!estimate.contains(10.0));
    }

    #[test]
    fn test_rejects_too_few_replications() {
        let replication = ReplicationConfig {
            replications: 1,
            ..small()
        };
        let config = SimulationConfig::new(1.0, 2.0);
        assert!(matches!(
            replicate(&config, &replication),
            Err(MetricsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_bad_confidence() {
        let replication = ReplicationConfig {
            confidence: 1.5,
            ..small()
        };
        assert!(replicate(&SimulationConfig::new(1.0, 2.0), &replication).is_err());
    }

    #[test]
    fn test_propagates_simulation_errors() {
        let replication = ReplicationConfig {
            customers: 0,
            ..small()
        };
        let err = replicate(&SimulationConfig::new(1.0, 2.0), &replication).unwrap_err();
        assert!(matches!(err, MetricsError::Simulation(_)));

        let err = replicate(&SimulationConfig::new(0.0, 2.0), &small()).unwrap_err();
        assert!(matches!(err, MetricsError::Simulation(_)));
    }

    #[test]
    fn test_replications_are_reproducible() {
        let config = SimulationConfig::new(1.0, 2.0);
        let a = replicate(&config, &small()).unwrap();
        let b = replicate(&config, &small()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.replications, 6);
        assert_eq!(a.customers, 2_000);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimulationConfig::new(3.0, 4.0);
        let sequential = replicate(&config, &small()).unwrap();
        for threads in [1, 2, 4, 16] {
            let parallel = replicate_parallel(&config, &small(), threads).unwrap();
            assert_eq!(sequential, parallel, "threads = {threads}");
        }
    }
}
