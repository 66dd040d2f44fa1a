use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, DataType, Reader, Xlsx};
use csv::{ReaderBuilder, Trim};

/// In-memory tabular input handed to the normalizers: trimmed headers plus
/// string-typed rows padded (or truncated) to the header width.
///
/// Cell typing, date parsing and numeric coercion are deliberately not done
/// here — the normalizers own those rules per field.
#[derive(Debug, Clone)]
pub struct SourceTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of an exactly-named column, if present.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }

    /// Parse a CSV file. Bytes are decoded UTF-8 with lossy replacement so a
    /// stray non-UTF-8 byte degrades one cell, not the whole file.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        Self::from_csv_str(&content)
    }

    /// Parse CSV content from a string.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .context("failed to read CSV header row")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("failed to parse CSV row")?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// Parse the first worksheet of an XLSX workbook; the first row is the
    /// header row.
    pub fn from_xlsx_path(path: &Path) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("failed to open {} as XLSX", path.display()))?;

        let range = workbook
            .worksheet_range_at(0)
            .context("workbook has no worksheets")?
            .context("failed to read first worksheet")?;

        let mut rows = range.rows().map(|row| {
            row.iter()
                .map(|cell| cell.as_string().unwrap_or_else(|| format!("{}", cell)))
                .collect::<Vec<String>>()
        });

        let headers = rows.next().unwrap_or_default();
        Ok(Self::new(headers, rows.collect()))
    }

    /// Load a source file of uncertain encoding: XLSX first, CSV fallback.
    /// The open-data portals publish workbooks under `.csv` names often
    /// enough that trying both is the only reliable strategy.
    pub fn load(path: &Path) -> Result<Self> {
        match Self::from_xlsx_path(path) {
            Ok(table) => Ok(table),
            Err(_) => Self::from_csv_path(path).with_context(|| {
                format!("{} is neither a readable XLSX nor CSV file", path.display())
            }),
        }
    }
}

/// Borrowed view of one table row with by-name cell access.
#[derive(Debug, Clone, Copy)]
pub struct Row<'t> {
    table: &'t SourceTable,
    cells: &'t [String],
}

impl<'t> Row<'t> {
    /// Cell by column position; empty string when out of range.
    pub fn cell(&self, index: usize) -> &'t str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Cell by exact column name; empty string when the column is missing.
    pub fn named(&self, header: &str) -> &'t str {
        match self.table.column_index(header) {
            Some(index) => self.cell(index),
            None => "",
        }
    }
}
