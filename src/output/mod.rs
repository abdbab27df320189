//! Output module for exporting crawl results
//!
//! This module handles:
//! - The final export: CSV, spreadsheet and JSON of every result, plus an
//!   error log when any attempt failed
//! - Autosave snapshots: CSV and spreadsheet under a fixed name, overwritten
//!   each time
//! - Summary statistics for display

mod csv_output;
mod json_output;
pub mod stats;
mod traits;
mod xlsx_output;

pub use csv_output::{CsvExporter, ErrorLogExporter};
pub use json_output::JsonExporter;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{with_suffix, Exporter, OutputError, OutputResult};
pub use xlsx_output::XlsxExporter;

use crate::storage::{PageRecord, ResultStore};
use std::path::{Path, PathBuf};

/// Writes the full export for a result store
///
/// Files written, relative to `base` (e.g. `./results`):
/// - `results.csv`, `results.xlsx`, `results.json` with every record
/// - `results_errors.log` with the error records, only when there are any
///
/// Reads the store without modifying it, so it can run on a mid-crawl snapshot.
///
/// # Returns
///
/// The paths of the files written, in the order above
pub fn export_results(store: &ResultStore, base: &Path) -> OutputResult<Vec<PathBuf>> {
    ensure_parent(base)?;

    let exporters: [&dyn Exporter; 3] = [&CsvExporter, &XlsxExporter, &JsonExporter];
    let mut written = Vec::with_capacity(4);
    for exporter in exporters {
        written.push(exporter.write_with_base(store.results(), base)?);
    }

    if !store.errors().is_empty() {
        written.push(ErrorLogExporter.write_with_base(store.errors(), base)?);
    }

    tracing::info!(
        "Exported {} results ({} errors) to {}.*",
        store.len(),
        store.errors().len(),
        base.display()
    );

    Ok(written)
}

/// Writes an autosave snapshot (CSV and spreadsheet) at `base`
pub fn write_autosave(records: &[PageRecord], base: &Path) -> OutputResult<Vec<PathBuf>> {
    ensure_parent(base)?;

    let exporters: [&dyn Exporter; 2] = [&CsvExporter, &XlsxExporter];
    let mut written = Vec::with_capacity(2);
    for exporter in exporters {
        written.push(exporter.write_with_base(records, base)?);
    }

    tracing::debug!("Autosaved {} records to {}.*", records.len(), base.display());
    Ok(written)
}

fn ensure_parent(base: &Path) -> OutputResult<()> {
    if let Some(parent) = base.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
