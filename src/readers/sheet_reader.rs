use crate::error::{Result, WorklistError};
use crate::models::RecordSet;
use crate::utils::constants::DEFAULT_NA_MARKER;
use calamine::{open_workbook_auto, Reader};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Where the table sits inside the sheet and which cells count as missing
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    /// 0-based sheet index, ignored for delimited text
    pub sheet_index: usize,
    /// 0-based row holding the column headers; rows above it are ignored
    pub header_row: usize,
    /// Data rows discarded directly after the header
    pub skip_rows: usize,
    /// Cell text (after trimming) read as a missing value
    pub na_values: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sheet_index: 0,
            header_row: 0,
            skip_rows: 0,
            na_values: vec![DEFAULT_NA_MARKER.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetFormat {
    Delimited(u8),
    Workbook,
}

pub struct SheetReader {
    options: ReadOptions,
}

impl SheetReader {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    /// Read a target spreadsheet into a record set, picking the format from the extension
    pub fn read(&self, path: &Path) -> Result<RecordSet> {
        let rows = match Self::detect_format(path)? {
            SheetFormat::Delimited(delimiter) => self.read_delimited(path, delimiter)?,
            SheetFormat::Workbook => self.read_workbook(path)?,
        };

        debug!(path = %path.display(), raw_rows = rows.len(), "read sheet");
        self.build_record_set(rows)
    }

    fn detect_format(path: &Path) -> Result<SheetFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" | "txt" => Ok(SheetFormat::Delimited(b',')),
            "tsv" => Ok(SheetFormat::Delimited(b'\t')),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(SheetFormat::Workbook),
            _ => Err(WorklistError::InvalidFormat(format!(
                "Unsupported spreadsheet type: '{}'",
                path.display()
            ))),
        }
    }

    fn read_delimited(&self, path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>> {
        let bytes = fs::read(path)?;
        let text = decode_text(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(rows)
    }

    fn read_workbook(&self, path: &Path) -> Result<Vec<Vec<String>>> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(self.options.sheet_index)
            .ok_or_else(|| {
                WorklistError::InvalidFormat(format!(
                    "Sheet {} not found in '{}'",
                    self.options.sheet_index,
                    path.display()
                ))
            })??;

        // The range starts at the first used cell; pad back to absolute positions
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];

        for cells in range.rows() {
            let mut row = vec![String::new(); start_col as usize];
            row.extend(cells.iter().map(|cell| cell.to_string()));
            rows.push(row);
        }

        Ok(rows)
    }

    /// Apply header/skip/missing-value options to raw rows
    pub fn build_record_set(&self, rows: Vec<Vec<String>>) -> Result<RecordSet> {
        let mut rows = rows.into_iter().skip(self.options.header_row);

        let header = rows.next().ok_or_else(|| {
            WorklistError::MissingData(format!(
                "No header row at index {}",
                self.options.header_row
            ))
        })?;

        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| match name.trim() {
                "" => format!("Unnamed: {}", i),
                trimmed => trimmed.to_string(),
            })
            .collect();

        let mut set = RecordSet::new(columns);
        for row in rows.skip(self.options.skip_rows) {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            set.push_row(row.into_iter().map(|cell| self.cell_value(cell)).collect());
        }

        Ok(set)
    }

    fn cell_value(&self, raw: String) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.options.na_values.iter().any(|na| na.trim() == trimmed) {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl Default for SheetReader {
    fn default() -> Self {
        Self::new(ReadOptions::default())
    }
}

/// Decode text as UTF-8, falling back to Windows-1252 for legacy spreadsheet exports
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Err(_) => {
            warn!("input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text
        }
    }
}
