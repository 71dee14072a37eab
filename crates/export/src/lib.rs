//! Rendering of summary tables as portable documents: CSV for spreadsheet
//! handoff, JSON for downstream dashboards. Rendering returns the document
//! as a string; writing it anywhere is a separate, explicit step.

pub mod delimited;
pub mod json;

use adlens_core::{AdLensError, AdLensResult};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub use delimited::{overview_csv, summary_csv, trend_csv};
pub use json::{overview_json, summary_json, trend_json};

/// Target encoding of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AdLensError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AdLensError::Export(format!(
                "unsupported format '{other}', expected csv or json"
            ))),
        }
    }
}

/// Write a rendered document to disk.
pub fn write_file(path: &Path, contents: &str) -> AdLensResult<()> {
    std::fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(())
}
