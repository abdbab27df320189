//! Exporter trait and error types
//!
//! This module defines the trait interface for export formats and the
//! errors they can produce.

use crate::storage::PageRecord;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for export formats
///
/// An exporter writes a full set of records to one file, replacing any
/// existing file at that path.
pub trait Exporter {
    /// File suffix appended to the export basename, e.g. `.csv`
    fn suffix(&self) -> &'static str;

    /// Writes `records` to `path`
    fn write(&self, records: &[PageRecord], path: &Path) -> OutputResult<()>;

    /// Writes `records` next to `base`, returning the file written
    ///
    /// The suffix is appended rather than substituted, so a basename with a
    /// dot in it keeps its full name.
    fn write_with_base(&self, records: &[PageRecord], base: &Path) -> OutputResult<PathBuf> {
        let path = with_suffix(base, self.suffix());
        self.write(records, &path)?;
        Ok(path)
    }
}

/// Appends `suffix` to the final component of `base`
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
