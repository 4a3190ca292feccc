//! Export of simulation results for external tools
//!
//! - JSON: the comparison report together with the raw result record.
//! - CSV: the wait sample (`index,wait`) and a metric summary, for
//!   spreadsheets and plotting layers.

pub mod csv;
pub mod json;

use std::path::Path;

use queuesim_core::SimulationResult;

use crate::error::MetricsError;
use crate::theory::Mm1Theory;

/// Trait for writing a run to a configured destination
pub trait ResultExporter {
    fn export(&self, theory: &Mm1Theory, result: &SimulationResult) -> Result<(), MetricsError>;
}

/// Export a run to JSON
///
/// # Example
/// ```no_run
/// use queuesim_core::QueueSimulator;
/// use queuesim_metrics::export::export_json;
/// use queuesim_metrics::Mm1Theory;
///
/// let result = QueueSimulator::with_seed(50.0, 60.0, 1).unwrap().run(100_000).unwrap();
/// let theory = Mm1Theory::new(50.0, 60.0).unwrap();
/// export_json(&theory, &result, "results/mm1.json", true).unwrap();
/// ```
pub fn export_json(
    theory: &Mm1Theory,
    result: &SimulationResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), MetricsError> {
    json::JsonExporter::new(path.as_ref(), pretty).export(theory, result)
}

/// Export a run to `{stem}_samples.csv` and `{stem}_summary.csv`
pub fn export_csv(
    theory: &Mm1Theory,
    result: &SimulationResult,
    path: impl AsRef<Path>,
) -> Result<(), MetricsError> {
    csv::CsvExporter::new(path.as_ref()).export(theory, result)
}
