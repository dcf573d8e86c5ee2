use crate::consts::GAP_CHAR;
use crate::errors::{FormatError, FormatResult};
use crate::io::FastaRecord;

///
/// One row of a multiple-sequence alignment: the record header and its gapped
/// sequence.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub description: String,
    pub sequence: Vec<u8>,
}

impl AlignedSequence {
    pub fn new(description: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        AlignedSequence {
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    /// The `len` characters starting at alignment column `column`.
    pub fn window(&self, column: usize, len: usize) -> Option<&[u8]> {
        self.sequence.get(column..column + len)
    }

    /// Number of non-gap characters strictly before `column`.
    pub fn ungapped_position(&self, column: usize) -> usize {
        self.sequence[..column.min(self.sequence.len())]
            .iter()
            .filter(|&&c| c != GAP_CHAR)
            .count()
    }

    /// The sequence with all gap characters removed.
    pub fn ungapped(&self) -> String {
        self.sequence
            .iter()
            .filter(|&&c| c != GAP_CHAR)
            .map(|&c| c as char)
            .collect()
    }
}

///
/// A gapped multiple-sequence alignment. Every row has the same width;
/// the alignment is never modified after construction.
///
#[derive(Debug, Clone)]
pub struct Alignment {
    rows: Vec<AlignedSequence>,
    width: usize,
}

impl Alignment {
    ///
    /// Build an alignment, checking that it is not empty and that all rows
    /// share the width of the first one.
    ///
    pub fn new(rows: Vec<AlignedSequence>) -> FormatResult<Self> {
        let first = rows
            .first()
            .ok_or_else(|| FormatError::EmptyFile("alignment".to_string()))?;
        let width = first.sequence.len();

        if let Some(row) = rows.iter().find(|r| r.sequence.len() != width) {
            return Err(FormatError::UnequalAlignment {
                id: row.description.clone(),
                expected: width,
                found: row.sequence.len(),
            });
        }

        Ok(Alignment { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[AlignedSequence] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlignedSequence> {
        self.rows.iter()
    }
}

impl TryFrom<Vec<FastaRecord>> for Alignment {
    type Error = FormatError;

    fn try_from(records: Vec<FastaRecord>) -> Result<Self, Self::Error> {
        let rows = records
            .into_iter()
            .map(|r| AlignedSequence::new(r.description, r.sequence.into_bytes()))
            .collect();
        Alignment::new(rows)
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a AlignedSequence;
    type IntoIter = std::slice::Iter<'a, AlignedSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_unequal_rows_rejected() {
        let rows = vec![
            AlignedSequence::new("a", "ACGT"),
            AlignedSequence::new("b", "ACG"),
        ];
        let result = Alignment::new(rows);
        assert!(matches!(
            result,
            Err(FormatError::UnequalAlignment { expected: 4, found: 3, .. })
        ));
    }

    #[rstest]
    fn test_empty_rejected() {
        assert!(Alignment::new(Vec::new()).is_err());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 2)]
    #[case(6, 4)]
    #[case(100, 4)]
    fn test_ungapped_position(#[case] column: usize, #[case] expected: usize) {
        let row = AlignedSequence::new("a", "AC-G-T");
        assert_eq!(row.ungapped_position(column), expected);
    }

    #[rstest]
    fn test_window() {
        let row = AlignedSequence::new("a", "AC-TGT");
        assert_eq!(row.window(3, 3), Some(&b"TGT"[..]));
        assert_eq!(row.window(4, 3), None);
        assert_eq!(row.ungapped(), "ACTGT");
    }

    #[rstest]
    fn test_try_from_fasta_records() {
        let records = vec![
            FastaRecord::new("x|TRBV1*01|Homo sapiens|F|", "AC-T"),
            FastaRecord::new("y|TRBV2*01|Homo sapiens|F|", "ACGT"),
        ];
        let alignment = Alignment::try_from(records).unwrap();
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.width(), 4);
    }
}
