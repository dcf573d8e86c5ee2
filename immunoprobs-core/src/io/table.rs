use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;

use crate::consts::{COMMENT_CHAR, NA_VALUE};
use crate::errors::{FormatError, FormatResult};
use crate::utils::get_dynamic_reader;

///
/// A delimited text table held in memory: a header row plus string records.
///
#[derive(Debug, Clone)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl DelimitedTable {
    ///
    /// Read a delimited file (optionally gzipped). Lines starting with `#`
    /// are skipped and the first remaining line is the header.
    ///
    pub fn read<P: AsRef<Path>>(path: P, separator: u8) -> FormatResult<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        let table = DelimitedTable::from_reader(reader, separator)?;
        debug!(
            "Read {} rows and {} columns from {}",
            table.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, separator: u8) -> FormatResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(separator)
            .comment(Some(COMMENT_CHAR))
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = csv_reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(DelimitedTable { headers, rows })
    }

    ///
    /// Position of a column, or [FormatError::MissingColumn] when the header
    /// does not carry it.
    ///
    pub fn column_index(&self, name: &str) -> FormatResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| FormatError::MissingColumn(name.to_string()))
    }

    ///
    /// Value of a cell, `None` for missing values (empty, `na`, `nan`, ...).
    ///
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(str::trim)
            .filter(|v| !is_missing(v))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The spellings of a missing value accepted in input tables.
pub fn is_missing(value: &str) -> bool {
    matches!(
        value.trim(),
        "" | "na" | "NA" | "nan" | "NaN" | "N/A" | "null" | "None"
    )
}

///
/// Write rows to a delimited file. `None` cells are written as `na`.
///
/// # Arguments
///
/// - path: output file
/// - separator: field separator
/// - headers: header row
/// - rows: one `Vec` of cells per row, same length as `headers`
///
pub fn write_table<P, I>(path: P, separator: u8, headers: &[&str], rows: I) -> FormatResult<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Vec<Option<String>>>,
{
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(separator)
        .from_path(path)?;

    writer.write_record(headers)?;
    let mut count = 0;
    for row in rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or(NA_VALUE)))?;
        count += 1;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", count, path.display());
    Ok(count)
}
