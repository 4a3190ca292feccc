//! CSV export for simulation runs
//!
//! Creates two files next to the configured path:
//! - `{stem}_samples.csv` - `index,wait` for every sampled customer
//! - `{stem}_summary.csv` - `metric,simulated,analytic,relative_error`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use queuesim_core::SimulationResult;
use tracing::debug;

use crate::error::MetricsError;
use crate::export::ResultExporter;
use crate::summary::Mm1Report;
use crate::theory::Mm1Theory;

/// CSV exporter for a single run
#[derive(Debug)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Get the path for a specific CSV file
    pub fn path_for(&self, suffix: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("queuesim");
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        parent.join(format!("{stem}_{suffix}.csv"))
    }

    fn create(&self, suffix: &str) -> Result<BufWriter<File>, MetricsError> {
        let path = self.path_for(suffix);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&path).map_err(|e| {
            MetricsError::ExportError(format!("failed to create {}: {e}", path.display()))
        })?;
        Ok(BufWriter::new(file))
    }

    fn export_samples(&self, result: &SimulationResult) -> Result<(), MetricsError> {
        let mut out = self.create("samples")?;
        writeln!(out, "index,wait")?;
        for (index, wait) in result.wait_samples.iter().enumerate() {
            writeln!(out, "{index},{wait}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn export_summary(&self, report: &Mm1Report) -> Result<(), MetricsError> {
        let mut out = self.create("summary")?;
        writeln!(out, "metric,simulated,analytic,relative_error")?;
        let errors = [
            report.wait_relative_error(),
            report.system_time_relative_error(),
            report.utilization_relative_error(),
        ];
        for ((name, simulated, analytic), error) in report.rows().into_iter().zip(errors) {
            writeln!(
                out,
                "{name},{simulated},{},{}",
                optional(analytic),
                optional(error)
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ResultExporter for CsvExporter {
    fn export(&self, theory: &Mm1Theory, result: &SimulationResult) -> Result<(), MetricsError> {
        self.export_samples(result)?;
        self.export_summary(&Mm1Report::new(theory, result))?;
        debug!(
            path = %self.path.display(),
            samples = result.wait_samples.len(),
            "CSV export written"
        );
        Ok(())
    }
}
