//! Summaries of a simulated run
//!
//! [`WaitSampleStats`] and [`histogram`] work on the bounded wait sample a run
//! returns, for a plotting or reporting layer. [`Mm1Report`] puts the run's
//! aggregates next to the closed-form values.

use std::fmt;

use queuesim_core::SimulationResult;
use serde::Serialize;

use crate::error::MetricsError;
use crate::theory::Mm1Theory;

/// Descriptive statistics over a wait sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitSampleStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    /// Fraction of sampled customers served on arrival
    pub zero_wait_fraction: f64,
}

impl WaitSampleStats {
    pub fn from_samples(samples: &[f64]) -> Result<Self, MetricsError> {
        if samples.is_empty() {
            return Err(MetricsError::EmptySample);
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|w| (w - mean) * (w - mean)).sum::<f64>() / count as f64;
        let zero_waits = sorted.iter().filter(|w| **w == 0.0).count();

        Ok(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[count - 1],
            p50: percentile(&sorted, 50.0),
            p90: percentile(&sorted, 90.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
            zero_wait_fraction: zero_waits as f64 / count as f64,
        })
    }
}

/// Calculate a percentile from sorted values
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let index = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// One equal-width histogram bin, `[lower, upper)` (the last bin is closed)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram spanning the sample's min to max
pub fn histogram(samples: &[f64], bins: usize) -> Result<Vec<HistogramBin>, MetricsError> {
    if bins == 0 {
        return Err(MetricsError::InvalidParameter(
            "histogram needs at least one bin".to_string(),
        ));
    }
    if samples.is_empty() {
        return Err(MetricsError::EmptySample);
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &sample in samples {
        let index = if width > 0.0 {
            (((sample - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        result[index].count += 1;
    }

    Ok(result)
}

/// The three headline queue metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueMetrics {
    pub avg_wait: f64,
    pub avg_system_time: f64,
    pub utilization: f64,
}

/// Side-by-side comparison of a run with the M/M/1 formulas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mm1Report {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub traffic_intensity: f64,
    pub total_customers: u64,
    pub simulated: QueueMetrics,
    /// Steady-state values for the same rates; absent when ρ ≥ 1
    pub analytic: Option<QueueMetrics>,
    /// `None` when the run returned no samples
    pub wait_stats: Option<WaitSampleStats>,
}

impl Mm1Report {
    pub fn new(theory: &Mm1Theory, result: &SimulationResult) -> Self {
        let analytic = match (
            theory.expected_wait(),
            theory.expected_system_time(),
            theory.utilization(),
        ) {
            (Some(avg_wait), Some(avg_system_time), Some(utilization)) => Some(QueueMetrics {
                avg_wait,
                avg_system_time,
                utilization,
            }),
            _ => None,
        };

        Self {
            arrival_rate: theory.arrival_rate(),
            service_rate: theory.service_rate(),
            traffic_intensity: theory.traffic_intensity(),
            total_customers: result.total_customers,
            simulated: QueueMetrics {
                avg_wait: result.avg_wait,
                avg_system_time: result.avg_system_time,
                utilization: result.utilization,
            },
            analytic,
            wait_stats: WaitSampleStats::from_samples(&result.wait_samples).ok(),
        }
    }

    /// |simulated − analytic| / analytic for the mean wait
    pub fn wait_relative_error(&self) -> Option<f64> {
        self.analytic
            .and_then(|a| relative_error(self.simulated.avg_wait, a.avg_wait))
    }

    pub fn system_time_relative_error(&self) -> Option<f64> {
        self.analytic
            .and_then(|a| relative_error(self.simulated.avg_system_time, a.avg_system_time))
    }

    pub fn utilization_relative_error(&self) -> Option<f64> {
        self.analytic
            .and_then(|a| relative_error(self.simulated.utilization, a.utilization))
    }

    /// Rows of (metric, simulated, analytic) in a fixed order
    pub fn rows(&self) -> [(&'static str, f64, Option<f64>); 3] {
        [
            (
                "avg_wait",
                self.simulated.avg_wait,
                self.analytic.map(|a| a.avg_wait),
            ),
            (
                "avg_system_time",
                self.simulated.avg_system_time,
                self.analytic.map(|a| a.avg_system_time),
            ),
            (
                "utilization",
                self.simulated.utilization,
                self.analytic.map(|a| a.utilization),
            ),
        ]
    }
}

fn relative_error(simulated: f64, analytic: f64) -> Option<f64> {
    (analytic != 0.0).then(|| (simulated - analytic).abs() / analytic.abs())
}

impl fmt::Display for Mm1Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "M/M/1 run: {} customers, lambda={} mu={} (rho={:.4})",
            self.total_customers, self.arrival_rate, self.service_rate, self.traffic_intensity
        )?;
        for (name, simulated, analytic) in self.rows() {
            match analytic {
                Some(expected) => writeln!(
                    f,
                    "  {name:<16} simulated={simulated:.4} analytic={expected:.4}"
                )?,
                None => writeln!(f, "  {name:<16} simulated={simulated:.4} analytic=n/a")?,
            }
        }
        if self.analytic.is_none() {
            writeln!(f, "  queue is unstable: no steady state exists")?;
        }
        if let Some(stats) = &self.wait_stats {
            writeln!(
                f,
                "  wait sample: n={} p50={:.4} p95={:.4} p99={:.4} max={:.4}",
                stats.count, stats.p50, stats.p95, stats.p99, stats.max
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(samples: Vec<f64>) -> SimulationResult {
        SimulationResult {
            total_customers: samples.len() as u64,
            avg_wait: 0.5,
            avg_system_time: 1.0,
            utilization: 0.5,
            wait_samples: samples,
        }
    }

    #[test]
    fn test_wait_stats() {
        let samples: Vec<f64> = (0..=100).map(f64::from).collect();
        let stats = WaitSampleStats::from_samples(&samples).unwrap();
        assert_eq!(stats.count, 101);
        assert_eq!(stats.mean, 50.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.p50, 50.0);
        assert_eq!(stats.p90, 90.0);
        assert_eq!(stats.p99, 99.0);
        assert!((stats.zero_wait_fraction - 1.0 / 101.0).abs() < 1e-12);
    }

    #[test]
    fn test_wait_stats_unsorted_input() {
        let stats = WaitSampleStats::from_samples(&[3.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.zero_wait_fraction, 0.5);
        assert_eq!(stats.mean, 1.0);
    }

    #[test]
    fn test_wait_stats_empty() {
        assert!(matches!(
            WaitSampleStats::from_samples(&[]),
            Err(MetricsError::EmptySample)
        ));
    }

    #[test]
    fn test_histogram_counts_every_sample() {
        let samples = [0.0, 0.1, 0.2, 0.5, 0.9, 1.0];
        let bins = histogram(&samples, 4).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), samples.len());
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[3].upper, 1.0);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[3].count, 2);
    }

    #[test]
    fn test_histogram_constant_sample() {
        let bins = histogram(&[2.0, 2.0, 2.0], 5).unwrap();
        assert_eq!(bins[0].count, 3);
        assert!(bins[1..].iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_histogram_rejects_zero_bins() {
        assert!(histogram(&[1.0], 0).is_err());
        assert!(histogram(&[], 3).is_err());
    }

    #[test]
    fn test_report_stable() {
        let theory = Mm1Theory::new(1.0, 2.0).unwrap();
        let report = Mm1Report::new(&theory, &result_with(vec![0.0, 1.0]));

        let analytic = report.analytic.unwrap();
        assert_eq!(analytic.avg_wait, 0.5);
        assert_eq!(analytic.avg_system_time, 1.0);
        assert_eq!(analytic.utilization, 0.5);
        assert_eq!(report.wait_relative_error(), Some(0.0));
        assert_eq!(report.utilization_relative_error(), Some(0.0));
        assert_eq!(report.wait_stats.as_ref().unwrap().count, 2);

        let text = report.to_string();
        assert!(text.contains("analytic=0.5000"));
    }

    #[test]
    fn test_report_unstable() {
        let theory = Mm1Theory::new(2.0, 1.0).unwrap();
        let report = Mm1Report::new(&theory, &result_with(Vec::new()));

        assert!(report.analytic.is_none());
        assert!(report.wait_stats.is_none());
        assert_eq!(report.wait_relative_error(), None);
        assert!(report.to_string().contains("unstable"));
    }
}
