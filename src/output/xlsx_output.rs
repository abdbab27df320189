//! Spreadsheet (XLSX) export

use crate::output::traits::{Exporter, OutputResult};
use crate::storage::{PageRecord, RECORD_COLUMNS};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Longest text Excel accepts in a single cell
const MAX_CELL_CHARS: usize = 32_767;

/// Index of the numeric status column
const STATUS_COLUMN: usize = 6;

/// Writes records to a single-sheet workbook with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl Exporter for XlsxExporter {
    fn suffix(&self) -> &'static str {
        ".xlsx"
    }

    fn write(&self, records: &[PageRecord], path: &Path) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Results")?;

        for (col, name) in RECORD_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            for (col, value) in record.to_row().iter().enumerate() {
                if col == STATUS_COLUMN {
                    worksheet.write_number(row, col as u16, record.status)?;
                } else if !value.is_empty() {
                    worksheet.write_string(row, col as u16, clip_cell(value))?;
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

fn clip_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((byte_index, _)) => &value[..byte_index],
        None => value,
    }
}
