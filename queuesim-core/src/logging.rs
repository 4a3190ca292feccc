//! Structured logging for queue simulation runs
//!
//! Logging is built on `tracing`. Nothing is printed unless the host installs
//! a subscriber, either its own or one of the initializers below.
//!
//! # Controlling output
//!
//! ```bash
//! # Default (info level)
//! cargo run --example mm1_report
//!
//! # Per-customer trace (very verbose for large runs)
//! RUST_LOG=queuesim_core=trace cargo run --example mm1_report
//! ```
//!
//! # Log level guidelines
//! - **TRACE**: one line per simulated customer
//! - **DEBUG**: simulator construction and reseeding
//! - **INFO**: run started / completed with aggregate results
//! - **WARN**: runs on an unstable queue (λ ≥ μ)

use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at info level
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless; only the first subscriber is installed.
///
/// # Example
/// ```rust
/// use queuesim_core::logging::init_simulation_logging_with_level;
///
/// init_simulation_logging_with_level("debug");
/// ```
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("queuesim_core={level},queuesim_metrics={level},{level}").into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Create a span for one simulator run
pub fn simulation_span(name: &str, customers: u64) -> Span {
    tracing::info_span!("simulation", name = name, customers = customers)
}

/// Logging helpers for simulator lifecycle events
pub mod events {
    use tracing::{debug, info, trace, warn};

    /// Log simulator construction
    pub fn simulator_created(arrival_rate: f64, service_rate: f64, seed: Option<u64>) {
        debug!(
            arrival_rate = arrival_rate,
            service_rate = service_rate,
            seed = ?seed,
            "Queue simulator created"
        );
    }

    /// Log a reseed of the random source
    pub fn simulator_reseeded(seed: u64) {
        debug!(seed = seed, "Random source reseeded");
    }

    /// Log run start
    pub fn run_started(customers: u64, traffic_intensity: f64) {
        if traffic_intensity >= 1.0 {
            warn!(
                customers = customers,
                traffic_intensity = traffic_intensity,
                "Queue is unstable (arrival rate >= service rate); waits will grow with run length"
            );
        }
        info!(
            customers = customers,
            traffic_intensity = traffic_intensity,
            "Simulation started"
        );
    }

    /// Log one processed customer
    pub fn customer_processed(index: u64, arrival: f64, wait: f64, departure: f64) {
        trace!(
            customer = index,
            arrival = arrival,
            wait = wait,
            departure = departure,
            "Customer served"
        );
    }

    /// Log run completion
    pub fn run_completed(customers: u64, avg_wait: f64, avg_system_time: f64, utilization: f64) {
        info!(
            customers = customers,
            avg_wait = avg_wait,
            avg_system_time = avg_system_time,
            utilization = utilization,
            "Simulation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_initialization_is_idempotent() {
        init_simulation_logging_with_level("debug");
        init_simulation_logging();
        tracing::info!("Test info message");
    }

    #[test]
    fn test_span_creation() {
        let span = simulation_span("test_simulation", 10);
        let _guard = span.enter();
        events::run_started(10, 0.5);
        events::customer_processed(0, 0.1, 0.0, 0.3);
        events::run_completed(10, 0.2, 0.7, 0.5);
    }

    #[test]
    fn test_unstable_run_logging() {
        events::simulator_created(2.0, 1.0, Some(1));
        events::simulator_reseeded(2);
        events::run_started(100, 2.0);
    }
}
