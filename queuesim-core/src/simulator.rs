//! Single-server FIFO queue simulator
//!
//! Arrivals are strictly ordered and service is non-preemptive, so the whole
//! trajectory follows from two scalars: the clock (last arrival time) and the
//! time the server becomes free. No event heap is needed.
//!
//! ```rust
//! use queuesim_core::QueueSimulator;
//!
//! let mut sim = QueueSimulator::with_seed(1.0, 2.0, 42).unwrap();
//! let result = sim.run(10_000).unwrap();
//! assert_eq!(result.total_customers, 10_000);
//! assert!(result.avg_system_time >= result.avg_wait);
//! ```

use crate::config::{SimulationConfig, WAIT_SAMPLE_CAP};
use crate::dists::ExponentialDistribution;
use crate::error::SimError;
use crate::logging::{events, simulation_span};
use crate::randomness::{ChaChaProvider, RandomProvider};
use crate::result::{CustomerRecord, SimulationResult};

/// M/M/1 simulator owning its random source
///
/// `run` takes `&mut self`: one instance serves one caller at a time.
/// Parallel trials need one independently seeded instance each.
#[derive(Debug, Clone)]
pub struct QueueSimulator<P = ChaChaProvider> {
    config: SimulationConfig,
    arrivals: ExponentialDistribution,
    service: ExponentialDistribution,
    provider: P,
}

impl QueueSimulator<ChaChaProvider> {
    /// Simulator for rates λ and μ, seeded from OS entropy
    pub fn new(arrival_rate: f64, service_rate: f64) -> Result<Self, SimError> {
        Self::from_config(&SimulationConfig::new(arrival_rate, service_rate))
    }

    /// Reproducible simulator: equal seeds give bit-identical results
    pub fn with_seed(arrival_rate: f64, service_rate: f64, seed: u64) -> Result<Self, SimError> {
        Self::from_config(&SimulationConfig::new(arrival_rate, service_rate).with_seed(seed))
    }

    /// Build from a config, seeding explicitly when `config.seed` is set
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let provider = match config.seed {
            Some(seed) => ChaChaProvider::seeded(seed),
            None => ChaChaProvider::from_entropy()?,
        };
        Self::build(config.clone(), provider)
    }

    /// Restart the random stream so the next run is reproducible
    pub fn reseed(&mut self, seed: u64) {
        self.provider.reseed(seed);
        self.config.seed = Some(seed);
        events::simulator_reseeded(seed);
    }
}

impl<P: RandomProvider> QueueSimulator<P> {
    /// Simulator drawing from an injected provider
    ///
    /// The provider's own state decides the draws, so any `config.seed` is
    /// cleared and [`config`](Self::config) reports `seed: None`.
    pub fn with_provider(mut config: SimulationConfig, provider: P) -> Result<Self, SimError> {
        config.seed = None;
        Self::build(config, provider)
    }

    fn build(config: SimulationConfig, provider: P) -> Result<Self, SimError> {
        config.validate()?;
        let arrivals = ExponentialDistribution::arrivals(config.arrival_rate)?;
        let service = ExponentialDistribution::service(config.service_rate)?;

        events::simulator_created(config.arrival_rate, config.service_rate, config.seed);

        Ok(Self {
            config,
            arrivals,
            service,
            provider,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrivals.rate()
    }

    pub fn service_rate(&self) -> f64 {
        self.service.rate()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Simulate `customer_count` customers from an empty queue at time 0
    ///
    /// Fails with [`SimError::InvalidParameter`] before drawing anything when
    /// `customer_count <= 0`.
    pub fn run(&mut self, customer_count: i64) -> Result<SimulationResult, SimError> {
        self.run_with_observer(customer_count, |_| {})
    }

    /// Same as [`run`](Self::run), handing each customer's record to `observer`
    /// in arrival order.
    pub fn run_with_observer<F>(
        &mut self,
        customer_count: i64,
        mut observer: F,
    ) -> Result<SimulationResult, SimError>
    where
        F: FnMut(&CustomerRecord),
    {
        let n = customer_positive(customer_count)?;
        let cap = self.config.sample_cap;

        let span = simulation_span("mm1", n);
        let _enter = span.enter();
        events::run_started(n, self.config.traffic_intensity());

        // larger caps grow on demand
        let reserve = usize::try_from(n).map_or(cap, |n| n.min(cap));
        let mut wait_samples = Vec::with_capacity(reserve.min(WAIT_SAMPLE_CAP));

        let mut clock = 0.0_f64;
        let mut server_free_at = 0.0_f64;
        let mut sum_wait = 0.0_f64;
        let mut sum_system_time = 0.0_f64;
        let mut sum_service_time = 0.0_f64;

        for index in 0..n {
            let inter_arrival = self.arrivals.sample(&mut self.provider);
            let service_duration = self.service.sample(&mut self.provider);

            clock += inter_arrival;
            let service_start = clock.max(server_free_at);
            let wait = service_start - clock;
            let system_time = wait + service_duration;
            server_free_at = service_start + service_duration;

            sum_wait += wait;
            sum_system_time += system_time;
            sum_service_time += service_duration;

            if wait_samples.len() < cap {
                wait_samples.push(wait);
            }

            events::customer_processed(index, clock, wait, server_free_at);
            observer(&CustomerRecord {
                index,
                arrival: clock,
                service_start,
                wait,
                service_duration,
                system_time,
                departure: server_free_at,
            });
        }

        let customers = n as f64;
        // server_free_at is zero only when every draw was zero (scripted sources)
        let utilization = if server_free_at > 0.0 {
            sum_service_time / server_free_at
        } else {
            0.0
        };

        let result = SimulationResult {
            total_customers: n,
            avg_wait: sum_wait / customers,
            avg_system_time: sum_system_time / customers,
            utilization,
            wait_samples,
        };

        events::run_completed(n, result.avg_wait, result.avg_system_time, result.utilization);
        Ok(result)
    }
}

fn customer_positive(customer_count: i64) -> Result<u64, SimError> {
    match u64::try_from(customer_count) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SimError::invalid(
            "customer_count",
            format!("must be at least 1, got {customer_count}"),
        )),
    }
}
