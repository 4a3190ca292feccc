//! # queuesim - M/M/1 queue simulator
//!
//! A discrete-event simulator for a single-server FIFO queue with Poisson
//! arrivals and exponential service times.
//!
//! ## Feature Flags
//!
//! - `default`: includes `metrics`
//! - `metrics`: analytic reference values, replications and export
//!
//! ## Example
//!
//! ```rust
//! use queuesim::prelude::*;
//!
//! let mut sim = QueueSimulator::with_seed(50.0, 60.0, 1)?;
//! let result = sim.run(100_000)?;
//! assert_eq!(result.wait_samples.len(), WAIT_SAMPLE_CAP);
//! # Ok::<(), queuesim::core::SimError>(())
//! ```

pub use queuesim_core as core;

#[cfg(feature = "metrics")]
pub use queuesim_metrics as metrics;

pub mod prelude {
    //! Commonly used types

    pub use queuesim_core::{
        ChaChaProvider, CustomerRecord, QueueSimulator, RandomProvider, SimError,
        SimulationConfig, SimulationResult, WAIT_SAMPLE_CAP,
    };

    #[cfg(feature = "metrics")]
    pub use queuesim_metrics::{MetricsError, Mm1Report, Mm1Theory, ReplicationConfig};
}
