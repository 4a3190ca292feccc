//! Run a large M/M/1 simulation and compare it with the closed-form values.
//!
//! ```bash
//! cargo run --release --example mm1_report
//! cargo run --release --example mm1_report -- config.json
//! RUST_LOG=debug cargo run --release --example mm1_report
//! ```
//!
//! `config.json` holds a `SimulationConfig`, e.g.
//! `{"arrival_rate": 50.0, "service_rate": 60.0, "seed": 7}`.

use std::time::Instant;

use queuesim::core::init_simulation_logging;
use queuesim::metrics::export::export_json;
use queuesim::metrics::{histogram, replicate_parallel};
use queuesim::prelude::*;
use tracing::info;

const CUSTOMERS: i64 = 10_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_simulation_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::new(50.0, 60.0),
    };
    let theory = Mm1Theory::from_config(&config)?;

    println!(
        "M/M/1 with {CUSTOMERS} customers: lambda={}/h, mu={}/h",
        config.arrival_rate, config.service_rate
    );

    let mut sim = QueueSimulator::from_config(&config)?;
    let start = Instant::now();
    let result = sim.run(CUSTOMERS)?;
    let elapsed = start.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "Run finished");

    let report = Mm1Report::new(&theory, &result);
    println!("{report}");
    println!("completed in {:.3}s", elapsed.as_secs_f64());

    println!("wait sample histogram (20 bins):");
    for bin in histogram(&result.wait_samples, 20)? {
        println!("  [{:>8.4}, {:>8.4}) {:>5}", bin.lower, bin.upper, bin.count);
    }

    let replication = ReplicationConfig {
        customers: 200_000,
        replications: 16,
        base_seed: config.seed.unwrap_or(0),
        confidence: 0.95,
    };
    let threads = std::thread::available_parallelism().map_or(1, |n| n.get());
    let estimate = replicate_parallel(&config, &replication, threads)?;
    println!(
        "{} replications: avg wait {:.4} ± {:.4}, utilization {:.4} ± {:.4}",
        estimate.replications,
        estimate.avg_wait.mean,
        estimate.avg_wait.half_width(),
        estimate.utilization.mean,
        estimate.utilization.half_width()
    );

    let out = std::env::temp_dir().join("queuesim").join("mm1_report.json");
    export_json(&theory, &result, &out, true)?;
    println!("report written to {}", out.display());

    Ok(())
}
