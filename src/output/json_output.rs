//! JSON export

use crate::output::traits::{Exporter, OutputResult};
use crate::storage::PageRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records as a pretty-printed UTF-8 JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn suffix(&self) -> &'static str {
        ".json"
    }

    fn write(&self, records: &[PageRecord], path: &Path) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }
}
