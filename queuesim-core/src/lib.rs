//! Core of the M/M/1 queue simulator.
//!
//! This crate implements the event-advancement loop and running statistics for
//! a single-server FIFO queue with Poisson arrivals and exponential service.
//!
//! # Architecture Overview
//!
//! - [`QueueSimulator`]: owns the configuration and one random source, and
//!   exposes [`QueueSimulator::run`].
//! - [`RandomProvider`]: the seam for the random source. [`ChaChaProvider`] is
//!   the default; [`ReplayProvider`] replays scripted draws.
//! - [`SimulationResult`]: plain data returned by a run.
//!
//! # Basic Usage
//!
//! ```rust
//! use queuesim_core::{QueueSimulator, SimulationConfig};
//!
//! let config = SimulationConfig::new(50.0, 60.0).with_seed(7);
//! let mut sim = QueueSimulator::from_config(&config)?;
//! let result = sim.run(100_000)?;
//!
//! println!("avg wait {:.4}, utilization {:.2}%", result.avg_wait, result.utilization * 100.0);
//! # Ok::<(), queuesim_core::SimError>(())
//! ```
//!
//! # Time Model
//!
//! Times are `f64` values in whatever unit the rates are expressed in. The
//! logical clock advances as fast as the loop runs; nothing is paced against
//! wall-clock time.

pub mod config;
pub mod dists;
pub mod error;
pub mod logging;
pub mod randomness;
pub mod result;
pub mod simulator;

pub use config::{SimulationConfig, MAX_SAMPLE_CAP, WAIT_SAMPLE_CAP};
pub use dists::{ExponentialDistribution, ARRIVAL_SITE, SERVICE_SITE};
pub use error::SimError;
pub use logging::{init_simulation_logging, init_simulation_logging_with_level, simulation_span};
pub use randomness::{ChaChaProvider, DrawSite, RandomProvider, ReplayProvider};
pub use result::{CustomerRecord, SimulationResult};
pub use simulator::QueueSimulator;
