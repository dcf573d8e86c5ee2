use std::path::Path;

use crate::consts::{DEFAULT_ALLELE, HEADER_FUNCTION_FIELD, HEADER_GENE_FIELD, IMGT_GAP_CHAR};
use crate::errors::FormatResult;
use crate::io::{FastaRecord, read_fasta};
use crate::models::header::header_field;

///
/// Family / gene / allele decomposition of an IMGT gene name, e.g.
/// `TRBV5-1*01` -> (`5`, `1`, `01`) and `TRBJ2*03` -> (`2`, none, `03`).
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneTaxonomy {
    pub family: String,
    pub gene: Option<String>,
    pub allele: String,
}

impl GeneTaxonomy {
    ///
    /// Parse a resolved gene name. The leading locus and segment letters are
    /// dropped; the allele falls back to `01` when absent.
    ///
    pub fn parse(name: &str) -> Option<Self> {
        let body = name.trim().trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let (designation, allele) = match body.split_once('*') {
            Some((d, a)) => (d, a.to_string()),
            None => (body, DEFAULT_ALLELE.to_string()),
        };
        if designation.is_empty() {
            return None;
        }

        let (family, gene) = match designation.split_once('-') {
            Some((f, g)) => (f.to_string(), Some(g.to_string())),
            None => (designation.to_string(), None),
        };

        Some(GeneTaxonomy {
            family,
            gene,
            allele,
        })
    }
}

///
/// A reference germline gene from an IMGT FASTA file, with IMGT gap
/// characters already removed from its sequence.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GermlineGene {
    /// Resolved IMGT name, e.g. `TRBV5-1*01`.
    pub name: String,
    pub function: Option<String>,
    pub sequence: String,
}

impl GermlineGene {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        GermlineGene {
            name: name.into(),
            function: None,
            sequence: sequence.into(),
        }
    }

    ///
    /// Build a gene from an IMGT FASTA record: the name comes from header
    /// field 1 (required), the function from field 3 (optional).
    ///
    pub fn from_fasta_record(record: &FastaRecord) -> FormatResult<Self> {
        let name = header_field(&record.description, HEADER_GENE_FIELD)?;
        let function = header_field(&record.description, HEADER_FUNCTION_FIELD)
            .ok()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        let sequence = record
            .sequence
            .chars()
            .filter(|&c| c != IMGT_GAP_CHAR)
            .collect::<String>()
            .to_ascii_uppercase();

        Ok(GermlineGene {
            name: name.trim().to_string(),
            function,
            sequence,
        })
    }

    pub fn taxonomy(&self) -> Option<GeneTaxonomy> {
        GeneTaxonomy::parse(&self.name)
    }
}

///
/// An ordered table of reference germline genes for one segment (V or J).
/// Order is the order of the source file and decides which candidate is
/// used first when a gene call matches several references.
///
#[derive(Debug, Clone, Default)]
pub struct GermlineGenes {
    genes: Vec<GermlineGene>,
}

impl GermlineGenes {
    pub fn new(genes: Vec<GermlineGene>) -> Self {
        GermlineGenes { genes }
    }

    pub fn from_fasta<P: AsRef<Path>>(path: P) -> FormatResult<Self> {
        let records = read_fasta(path)?;
        let genes = records
            .iter()
            .map(GermlineGene::from_fasta_record)
            .collect::<FormatResult<Vec<_>>>()?;
        Ok(GermlineGenes { genes })
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GermlineGene> {
        self.genes.iter()
    }

    pub fn genes(&self) -> &[GermlineGene] {
        &self.genes
    }
}

impl FromIterator<GermlineGene> for GermlineGenes {
    fn from_iter<I: IntoIterator<Item = GermlineGene>>(iter: I) -> Self {
        GermlineGenes::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("TRBV5-1*01", "5", Some("1"), "01")]
    #[case("TRBJ2-7*02", "2", Some("7"), "02")]
    #[case("TRBV20-1", "20", Some("1"), "01")]
    #[case("TRBV9*03", "9", None, "03")]
    fn test_taxonomy(
        #[case] name: &str,
        #[case] family: &str,
        #[case] gene: Option<&str>,
        #[case] allele: &str,
    ) {
        let taxonomy = GeneTaxonomy::parse(name).unwrap();
        assert_eq!(taxonomy.family, family);
        assert_eq!(taxonomy.gene.as_deref(), gene);
        assert_eq!(taxonomy.allele, allele);
    }

    #[rstest]
    fn test_taxonomy_without_numbers() {
        assert_eq!(GeneTaxonomy::parse("TRBV"), None);
    }

    #[rstest]
    fn test_from_fasta_record_strips_imgt_gaps() {
        let record = FastaRecord::new(
            "L36092|TRBV5-1*01|Homo sapiens|F|V-REGION|",
            "AAG...GCT..GTG",
        );
        let gene = GermlineGene::from_fasta_record(&record).unwrap();
        assert_eq!(gene.name, "TRBV5-1*01");
        assert_eq!(gene.function.as_deref(), Some("F"));
        assert_eq!(gene.sequence, "AAGGCTGTG");
    }

    #[rstest]
    fn test_from_fasta_record_without_gene_field() {
        let record = FastaRecord::new("TRBV5-1*01", "ACGT");
        assert!(GermlineGene::from_fasta_record(&record).is_err());
    }
}
