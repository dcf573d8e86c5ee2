use regex::Regex;

use immunoprobs_core::models::{GermlineGene, GermlineGenes};

use crate::errors::ExtractResult;
use crate::resolve::build_resolved_pattern;

///
/// Compile a resolved pattern for matching against reference identifiers.
///
/// The match must start at the beginning of the identifier or right after a
/// character that is neither a digit nor `-`, so `5\-1\*01$` selects
/// `TRBV5-1*01` but not `TRBV25-1*01`, and `1\*01$` does not select
/// `TRBV5-1*01`.
///
/// This is stricter than plain containment, under which `5\*01$` would also
/// select `TRBV15*01`.
///
pub fn compile_pattern(pattern: &str) -> ExtractResult<Regex> {
    Ok(Regex::new(&format!(r"(?:^|[^0-9\-])(?:{})", pattern))?)
}

///
/// Reference germline genes of one segment, looked up by resolved gene call.
///
#[derive(Debug, Clone)]
pub struct ReferenceGenes {
    genes: GermlineGenes,
}

impl ReferenceGenes {
    pub fn new(genes: GermlineGenes) -> Self {
        ReferenceGenes { genes }
    }

    pub fn genes(&self) -> &GermlineGenes {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    ///
    /// Indices of the reference genes matching a resolved gene call.
    ///
    /// Candidates are ordered by pattern first and file order second, without
    /// duplicates; the first candidate is the one used for reconstruction.
    ///
    pub fn candidate_indices(
        &self,
        value: &str,
        use_allele: bool,
        default_allele: &str,
    ) -> ExtractResult<Vec<usize>> {
        let mut indices = Vec::new();
        for pattern in build_resolved_pattern(value, use_allele, default_allele)? {
            let regex = compile_pattern(&pattern)?;
            for (i, gene) in self.genes.iter().enumerate() {
                if regex.is_match(&gene.name) && !indices.contains(&i) {
                    indices.push(i);
                }
            }
        }
        Ok(indices)
    }

    pub fn get(&self, index: usize) -> Option<&GermlineGene> {
        self.genes.genes().get(index)
    }
}

impl From<GermlineGenes> for ReferenceGenes {
    fn from(genes: GermlineGenes) -> Self {
        ReferenceGenes::new(genes)
    }
}
