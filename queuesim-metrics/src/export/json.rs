//! JSON export for simulation runs

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use queuesim_core::SimulationResult;
use serde::Serialize;
use tracing::debug;

use crate::error::MetricsError;
use crate::export::ResultExporter;
use crate::summary::Mm1Report;
use crate::theory::Mm1Theory;

/// JSON exporter for a single run
#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }

    /// Render the export document without writing it
    pub fn render(&self, theory: &Mm1Theory, result: &SimulationResult) -> Result<String, MetricsError> {
        let export_data = ExportData {
            report: Mm1Report::new(theory, result),
            result,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&export_data)?
        } else {
            serde_json::to_string(&export_data)?
        };
        Ok(json)
    }
}

impl ResultExporter for JsonExporter {
    fn export(&self, theory: &Mm1Theory, result: &SimulationResult) -> Result<(), MetricsError> {
        let json = self.render(theory, result)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.path).map_err(|e| {
            MetricsError::ExportError(format!("failed to create {}: {e}", self.path.display()))
        })?;
        file.write_all(json.as_bytes())?;

        debug!(path = %self.path.display(), bytes = json.len(), "JSON export written");
        Ok(())
    }
}

/// Complete export document
#[derive(Debug, Serialize)]
struct ExportData<'a> {
    report: Mm1Report,
    result: &'a SimulationResult,
}
