use std::fmt::{self, Display};

use crate::config::ColumnNames;
use crate::errors::{FormatError, FormatResult};
use crate::io::DelimitedTable;

/// Reading frame classification of a sequencing read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    In,
    Out,
    Stop,
}

impl FrameType {
    /// Case-insensitive parse of `in`, `out` and `stop`. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "in" => Some(FrameType::In),
            "out" => Some(FrameType::Out),
            "stop" => Some(FrameType::Stop),
            _ => None,
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, FrameType::In)
    }
}

impl Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::In => write!(f, "In"),
            FrameType::Out => write!(f, "Out"),
            FrameType::Stop => write!(f, "Stop"),
        }
    }
}

///
/// One row of a repertoire table: a partial (CDR3 bearing) read together with
/// its free-text V and J gene calls.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepertoireRecord {
    pub row_id: String,
    pub nt_sequence: String,
    pub aa_sequence: Option<String>,
    pub frame_type: Option<FrameType>,
    pub cdr3_length: usize,
    pub v_resolved: Option<String>,
    pub j_resolved: Option<String>,
}

impl RepertoireRecord {
    ///
    /// Convert every row of a table using the configured column names.
    ///
    /// All columns except the row identifier are required; when the row
    /// identifier column is absent the zero-based row number is used.
    ///
    /// # Errors
    ///
    /// - [FormatError::MissingColumn] for a required column not in the header
    /// - [FormatError::InvalidValue] for a missing nucleotide sequence or a
    ///   CDR3 length that is not a non-negative integer
    ///
    pub fn from_table(table: &DelimitedTable, columns: &ColumnNames) -> FormatResult<Vec<Self>> {
        let row_id_col = table.column_index(&columns.row_id).ok();
        let nt_col = table.column_index(&columns.nt_sequence)?;
        let aa_col = table.column_index(&columns.aa_sequence)?;
        let frame_col = table.column_index(&columns.frame_type)?;
        let cdr3_col = table.column_index(&columns.cdr3_length)?;
        let v_col = table.column_index(&columns.v_resolved)?;
        let j_col = table.column_index(&columns.j_resolved)?;

        let mut records = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let row_id = match row_id_col.and_then(|c| table.value(row, c)) {
                Some(id) => id.to_string(),
                None => row.to_string(),
            };

            let nt_sequence = table
                .value(row, nt_col)
                .ok_or_else(|| FormatError::InvalidValue {
                    column: columns.nt_sequence.clone(),
                    row,
                    value: String::new(),
                })?
                .to_ascii_uppercase();

            let raw_length = table.value(row, cdr3_col).unwrap_or("");
            let cdr3_length =
                parse_length(raw_length).ok_or_else(|| FormatError::InvalidValue {
                    column: columns.cdr3_length.clone(),
                    row,
                    value: raw_length.to_string(),
                })?;

            records.push(RepertoireRecord {
                row_id,
                nt_sequence,
                aa_sequence: table.value(row, aa_col).map(str::to_string),
                frame_type: table.value(row, frame_col).and_then(FrameType::parse),
                cdr3_length,
                v_resolved: table.value(row, v_col).map(str::to_string),
                j_resolved: table.value(row, j_col).map(str::to_string),
            });
        }

        Ok(records)
    }
}

/// Lengths may come through as `45` or `45.0` depending on the exporter.
fn parse_length(value: &str) -> Option<usize> {
    if let Ok(n) = value.parse::<usize>() {
        return Some(n);
    }
    let float = value.parse::<f64>().ok()?;
    if float >= 0.0 && float.fract() == 0.0 {
        Some(float as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    const HEADER: &str = "row_id\tnt_sequence\taa_sequence\tframe_type\tcdr3_length\tv_resolved\tj_resolved";

    fn table(body: &str) -> DelimitedTable {
        let data = format!("{}\n{}", HEADER, body);
        DelimitedTable::from_reader(Cursor::new(data), b'\t').unwrap()
    }

    #[rstest]
    #[case("In", Some(FrameType::In))]
    #[case("OUT", Some(FrameType::Out))]
    #[case("stop", Some(FrameType::Stop))]
    #[case("unknown", None)]
    fn test_frame_type_parse(#[case] value: &str, #[case] expected: Option<FrameType>) {
        assert_eq!(FrameType::parse(value), expected);
    }

    #[rstest]
    fn test_from_table() {
        let table = table(
            "7\tacgt\tCASS\tIn\t42\tTRBV5-1*01\tTRBJ2-7\n8\tTTTT\tna\tOut\t39.0\tna\tTRBJ1-1*01\n",
        );
        let records = RepertoireRecord::from_table(&table, &ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_id, "7");
        assert_eq!(records[0].nt_sequence, "ACGT");
        assert_eq!(records[0].frame_type, Some(FrameType::In));
        assert_eq!(records[0].cdr3_length, 42);
        assert_eq!(records[1].aa_sequence, None);
        assert_eq!(records[1].v_resolved, None);
        assert_eq!(records[1].cdr3_length, 39);
    }

    #[rstest]
    fn test_from_table_missing_column() {
        let data = "row_id\tnt_sequence\n0\tACGT\n";
        let table = DelimitedTable::from_reader(Cursor::new(data), b'\t').unwrap();
        let result = RepertoireRecord::from_table(&table, &ColumnNames::default());
        assert!(matches!(result, Err(FormatError::MissingColumn(c)) if c == "aa_sequence"));
    }

    #[rstest]
    fn test_from_table_generates_row_ids() {
        let data = "nt_sequence\taa_sequence\tframe_type\tcdr3_length\tv_resolved\tj_resolved\nAC\tna\tIn\t2\tna\tna\nGT\tna\tIn\t2\tna\tna\n";
        let table = DelimitedTable::from_reader(Cursor::new(data), b'\t').unwrap();
        let records = RepertoireRecord::from_table(&table, &ColumnNames::default()).unwrap();
        assert_eq!(records[0].row_id, "0");
        assert_eq!(records[1].row_id, "1");
    }

    #[rstest]
    #[case("abc")]
    #[case("-3")]
    #[case("4.5")]
    #[case("na")]
    fn test_from_table_invalid_length(#[case] length: &str) {
        let table = table(&format!("0\tACGT\tCASS\tIn\t{}\tna\tna\n", length));
        let result = RepertoireRecord::from_table(&table, &ColumnNames::default());
        assert!(matches!(result, Err(FormatError::InvalidValue { row: 0, .. })));
    }
}
