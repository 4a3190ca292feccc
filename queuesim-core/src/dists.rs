//! Exponential distributions for interarrival and service times
//!
//! Both sides of an M/M/1 queue are memoryless: interarrival gaps are
//! exponential with the arrival rate, service durations exponential with the
//! service rate. Times are plain `f64` in the caller's time unit.

use rand_distr::Exp;

use crate::error::{check_rate, SimError};
use crate::randomness::{DrawSite, RandomProvider};

/// Draw site for interarrival gaps
pub const ARRIVAL_SITE: DrawSite = DrawSite::named("queue.interarrival");

/// Draw site for service durations
pub const SERVICE_SITE: DrawSite = DrawSite::named("queue.service");

/// Exponential distribution bound to a draw site
///
/// Sampling is delegated to a [`RandomProvider`] so the same distribution can
/// be driven by an entropy-seeded, explicitly seeded, or scripted source.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialDistribution {
    rate: f64,
    exp: Exp<f64>,
    site: DrawSite,
}

impl ExponentialDistribution {
    /// Create a new exponential distribution
    ///
    /// # Arguments
    ///
    /// * `name` - Parameter name reported on rejection
    /// * `rate` - Events per unit time; must be finite and positive
    /// * `site` - Label attached to every draw
    pub fn new(name: &'static str, rate: f64, site: DrawSite) -> Result<Self, SimError> {
        let rate = check_rate(name, rate)?;
        let exp = Exp::new(rate).map_err(|e| SimError::InvalidParameter {
            name,
            reason: e.to_string(),
        })?;
        Ok(Self { rate, exp, site })
    }

    /// Interarrival distribution for arrival rate λ
    pub fn arrivals(rate: f64) -> Result<Self, SimError> {
        Self::new("arrival_rate", rate, ARRIVAL_SITE)
    }

    /// Service-time distribution for service rate μ
    pub fn service(rate: f64) -> Result<Self, SimError> {
        Self::new("service_rate", rate, SERVICE_SITE)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn site(&self) -> DrawSite {
        self.site
    }

    /// Mean of the distribution (1/rate)
    pub fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    /// Draw one value in `[0, inf)`
    pub fn sample<P: RandomProvider + ?Sized>(&self, provider: &mut P) -> f64 {
        provider.sample_exp(self.site, &self.exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::{ChaChaProvider, ReplayProvider};

    #[test]
    fn test_exponential_distribution_creation() {
        let dist = ExponentialDistribution::service(2.0).unwrap();
        assert_eq!(dist.rate(), 2.0);
        assert_eq!(dist.mean(), 0.5);
        assert_eq!(dist.site(), SERVICE_SITE);
    }

    #[test]
    fn test_exponential_distribution_invalid_rate() {
        assert!(ExponentialDistribution::arrivals(0.0).is_err());
        assert!(ExponentialDistribution::arrivals(-3.0).is_err());
        assert!(ExponentialDistribution::service(f64::NAN).is_err());
    }

    #[test]
    fn test_sample_mean_close_to_inverse_rate() {
        let dist = ExponentialDistribution::arrivals(4.0).unwrap();
        let mut provider = ChaChaProvider::seeded(42);

        let n = 50_000;
        let total: f64 = (0..n).map(|_| dist.sample(&mut provider)).sum();
        let mean = total / n as f64;

        assert!((mean - 0.25).abs() < 0.01, "sample mean {mean} too far from 0.25");
    }

    #[test]
    fn test_samples_are_non_negative() {
        let dist = ExponentialDistribution::service(10.0).unwrap();
        let mut provider = ChaChaProvider::seeded(1);
        for _ in 0..1_000 {
            assert!(dist.sample(&mut provider) >= 0.0);
        }
    }

    #[test]
    fn test_sample_routes_through_site() {
        let arrivals = ExponentialDistribution::arrivals(1.0).unwrap();
        let service = ExponentialDistribution::service(1.0).unwrap();
        let mut provider = ReplayProvider::new(0)
            .with_script(ARRIVAL_SITE, [1.5])
            .and_then(|p| p.with_script(SERVICE_SITE, [0.75]))
            .unwrap();

        assert_eq!(service.sample(&mut provider), 0.75);
        assert_eq!(arrivals.sample(&mut provider), 1.5);
    }
}
