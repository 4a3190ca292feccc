//! Analysis and export for queue simulation results
//!
//! This crate turns a [`SimulationResult`](queuesim_core::SimulationResult)
//! into something to compare and ship:
//! - [`Mm1Theory`]: closed-form M/M/1 steady-state values.
//! - [`Mm1Report`], [`WaitSampleStats`], [`histogram`]: summaries of one run.
//! - [`replicate`]: interval estimates over independently seeded runs.
//! - [`export`]: JSON and CSV writers.

pub mod error;
pub mod export;
pub mod replication;
pub mod stats;
pub mod summary;
pub mod theory;

pub use error::MetricsError;
pub use export::{export_csv, export_json, ResultExporter};
pub use replication::{
    replicate, replicate_parallel, IntervalEstimate, ReplicationConfig, ReplicationEstimate,
};
pub use summary::{histogram, HistogramBin, Mm1Report, QueueMetrics, WaitSampleStats};
pub use theory::Mm1Theory;
