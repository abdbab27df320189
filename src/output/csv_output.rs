//! CSV export and the CSV-formatted error log

use crate::output::traits::{Exporter, OutputResult};
use crate::storage::{PageRecord, RECORD_COLUMNS};
use std::path::Path;

/// Writes records as CSV with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn suffix(&self) -> &'static str {
        ".csv"
    }

    fn write(&self, records: &[PageRecord], path: &Path) -> OutputResult<()> {
        write_csv(records, path)
    }
}

/// Writes error records to `<basename>_errors.log` in CSV layout
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLogExporter;

impl Exporter for ErrorLogExporter {
    fn suffix(&self) -> &'static str {
        "_errors.log"
    }

    fn write(&self, records: &[PageRecord], path: &Path) -> OutputResult<()> {
        write_csv(records, path)
    }
}

fn write_csv(records: &[PageRecord], path: &Path) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}
