use crate::consts::{HEADER_FUNCTION_FIELD, HEADER_GENE_FIELD, HEADER_SEPARATOR};
use crate::errors::{FormatError, FormatResult};

///
/// Get a single `|`-separated field of an IMGT style FASTA header.
///
pub fn header_field(header: &str, index: usize) -> FormatResult<&str> {
    header
        .split(HEADER_SEPARATOR)
        .nth(index)
        .ok_or_else(|| FormatError::HeaderFieldMissing {
            header: header.to_string(),
            index,
        })
}

///
/// Gene name and functionality parsed from an IMGT header such as
/// `M14158|TRBJ1-3*01|Homo sapiens|F|J-REGION|...`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneAnnotation {
    pub gene: String,
    pub function: String,
}

impl GeneAnnotation {
    pub fn from_header(header: &str) -> FormatResult<Self> {
        let gene = header_field(header, HEADER_GENE_FIELD)?;
        let function = header_field(header, HEADER_FUNCTION_FIELD)?;
        Ok(GeneAnnotation {
            gene: gene.trim().to_string(),
            function: function.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_from_imgt_header() {
        let header =
            "M14158|TRBJ1-3*01|Homo sapiens|F|J-REGION|1499..1548|50 nt|2| | | | |50+0=50| | |";
        let annotation = GeneAnnotation::from_header(header).unwrap();
        assert_eq!(annotation.gene, "TRBJ1-3*01");
        assert_eq!(annotation.function, "F");
    }

    #[rstest]
    #[case("TRBJ1-3*01")]
    #[case("M14158|TRBJ1-3*01|Homo sapiens")]
    fn test_from_header_missing_fields(#[case] header: &str) {
        let result = GeneAnnotation::from_header(header);
        match result {
            Err(FormatError::HeaderFieldMissing { header: h, .. }) => assert_eq!(h, header),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
