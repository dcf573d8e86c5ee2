use std::collections::HashMap;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use log::{debug, info};

use immunoprobs_core::WorkerPool;
use immunoprobs_core::config::{ColumnNames, ExtractSettings};
use immunoprobs_core::errors::FormatResult;
use immunoprobs_core::io::write_table;
use immunoprobs_core::models::{FrameType, RepertoireRecord};
use immunoprobs_core::utils::{separator_extension, unique_output_path};

use crate::consts::*;
use crate::errors::{ExtractError, ExtractResult};
use crate::lcs::find_longest_substring;
use crate::reference::ReferenceGenes;

/// A trimmed CDR3 read with the reference alleles its gene calls resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdr3Row {
    pub row_id: String,
    pub nt_sequence: String,
    pub aa_sequence: Option<String>,
    /// Matching V reference names joined by `|`, `None` when nothing matched.
    pub v_gene_choice: Option<String>,
    pub j_gene_choice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullLengthRow {
    pub row_id: String,
    pub nt_sequence: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub rows: usize,
    pub reconstructed: usize,
    /// Rows whose splice failed the overlap sanity check.
    pub rejected: usize,
    /// Rows without a V or a J reference candidate.
    pub unmatched: usize,
    /// Spliced rows where the V or J call matched more than one reference.
    pub ambiguous: usize,
}

impl ExtractionSummary {
    fn add(&mut self, other: &ExtractionSummary) {
        self.rows += other.rows;
        self.reconstructed += other.reconstructed;
        self.rejected += other.rejected;
        self.unmatched += other.unmatched;
        self.ambiguous += other.ambiguous;
    }
}

impl Display for ExtractionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} reconstructed, {} rejected, {} without reference match, {} ambiguous",
            self.rows, self.reconstructed, self.rejected, self.unmatched, self.ambiguous
        )
    }
}

///
/// The four output tables of an extraction, in input row order.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    pub cdr3: Vec<Cdr3Row>,
    pub productive: Vec<FullLengthRow>,
    pub unproductive: Vec<FullLengthRow>,
    pub all: Vec<FullLengthRow>,
    pub summary: ExtractionSummary,
}

/// Paths of the tables written by [ExtractionResult::write_to_dir].
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub cdr3: PathBuf,
    pub productive: PathBuf,
    pub unproductive: PathBuf,
    pub all: PathBuf,
}

impl ExtractionResult {
    fn with_capacity(rows: usize) -> Self {
        ExtractionResult {
            cdr3: Vec::with_capacity(rows),
            productive: Vec::new(),
            unproductive: Vec::new(),
            all: Vec::with_capacity(rows),
            summary: ExtractionSummary::default(),
        }
    }

    ///
    /// Concatenate per-shard results in shard order.
    ///
    pub fn concat<I: IntoIterator<Item = ExtractionResult>>(parts: I) -> Self {
        let mut merged = ExtractionResult::default();
        for part in parts {
            merged.cdr3.extend(part.cdr3);
            merged.productive.extend(part.productive);
            merged.unproductive.extend(part.unproductive);
            merged.all.extend(part.all);
            merged.summary.add(&part.summary);
        }
        merged
    }

    ///
    /// Write the CDR3 table and the three full length tables to
    /// `<directory>/<prefix>CDR3`, `<prefix>full_length_productive`,
    /// `<prefix>full_length_unproductive` and `<prefix>full_length`. Existing
    /// files are never overwritten.
    ///
    pub fn write_to_dir(
        &self,
        directory: &Path,
        prefix: &str,
        separator: u8,
        columns: &ColumnNames,
    ) -> FormatResult<OutputFiles> {
        let extension = separator_extension(separator);
        let target =
            |suffix: &str| unique_output_path(directory, &format!("{}{}", prefix, suffix), extension);

        let cdr3 = target(CDR3_SUFFIX);
        write_table(
            &cdr3,
            separator,
            &[
                columns.row_id.as_str(),
                columns.nt_sequence.as_str(),
                columns.aa_sequence.as_str(),
                columns.v_gene_choice.as_str(),
                columns.j_gene_choice.as_str(),
            ],
            self.cdr3.iter().map(|row| {
                vec![
                    Some(row.row_id.clone()),
                    Some(row.nt_sequence.clone()),
                    row.aa_sequence.clone(),
                    row.v_gene_choice.clone(),
                    row.j_gene_choice.clone(),
                ]
            }),
        )?;

        let full_length_headers = [columns.row_id.as_str(), columns.nt_sequence.as_str()];
        let write_full_length = |suffix: &str, rows: &[FullLengthRow]| -> FormatResult<PathBuf> {
            let path = target(suffix);
            write_table(
                &path,
                separator,
                &full_length_headers,
                rows.iter()
                    .map(|row| vec![Some(row.row_id.clone()), Some(row.nt_sequence.clone())]),
            )?;
            Ok(path)
        };

        Ok(OutputFiles {
            productive: write_full_length(PRODUCTIVE_SUFFIX, &self.productive)?,
            unproductive: write_full_length(UNPRODUCTIVE_SUFFIX, &self.unproductive)?,
            all: write_full_length(ALL_SUFFIX, &self.all)?,
            cdr3,
        })
    }
}

///
/// Rebuilds full length V(D)J sequences from CDR3 bearing reads by splicing
/// the read between the matching V and J reference genes.
///
#[derive(Debug, Clone)]
pub struct SequenceExtractor {
    v_genes: ReferenceGenes,
    j_genes: ReferenceGenes,
    settings: ExtractSettings,
}

impl SequenceExtractor {
    pub fn new(v_genes: ReferenceGenes, j_genes: ReferenceGenes, settings: ExtractSettings) -> Self {
        SequenceExtractor {
            v_genes,
            j_genes,
            settings,
        }
    }

    pub fn settings(&self) -> &ExtractSettings {
        &self.settings
    }

    ///
    /// Process all records on the worker pool. Each worker handles one
    /// contiguous shard and the shard results are concatenated in order, so
    /// the output does not depend on the number of workers.
    ///
    /// # Errors
    ///
    /// Any CDR3 length above the trim offset, or a malformed resolved gene,
    /// aborts the whole extraction.
    ///
    pub fn extract(&self, records: &[RepertoireRecord], pool: &WorkerPool) -> ExtractResult<ExtractionResult> {
        self.check_lengths(records)?;
        debug!(
            "Extracting {} records using {} worker(s)",
            records.len(),
            pool.num_workers(records.len())
        );

        let parts = pool
            .map_shards(records, |shard| self.reassemble_chunk(shard))?
            .into_iter()
            .collect::<ExtractResult<Vec<_>>>()?;

        let result = ExtractionResult::concat(parts);
        info!("Extraction finished: {}", result.summary);
        Ok(result)
    }

    ///
    /// Process one shard of records in order.
    ///
    pub fn reassemble_chunk(&self, records: &[RepertoireRecord]) -> ExtractResult<ExtractionResult> {
        let mut result = ExtractionResult::with_capacity(records.len());
        let mut v_cache: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut j_cache: HashMap<&str, Vec<usize>> = HashMap::new();

        for record in records {
            let trimmed = self.trim(record)?;
            let v_matches = self.lookup(&self.v_genes, record.v_resolved.as_deref(), &mut v_cache)?;
            let j_matches = self.lookup(&self.j_genes, record.j_resolved.as_deref(), &mut j_cache)?;

            result.summary.rows += 1;
            result.cdr3.push(Cdr3Row {
                row_id: record.row_id.clone(),
                nt_sequence: trimmed.to_string(),
                aa_sequence: record.aa_sequence.clone(),
                v_gene_choice: self.choice(&self.v_genes, &v_matches),
                j_gene_choice: self.choice(&self.j_genes, &j_matches),
            });

            let (Some(v_gene), Some(j_gene)) = (
                v_matches.first().and_then(|&i| self.v_genes.get(i)),
                j_matches.first().and_then(|&i| self.j_genes.get(i)),
            ) else {
                result.summary.unmatched += 1;
                continue;
            };
            if v_matches.len() > 1 || j_matches.len() > 1 {
                result.summary.ambiguous += 1;
            }

            let Some(sequence) = splice(&v_gene.sequence, &j_gene.sequence, trimmed) else {
                result.summary.rejected += 1;
                continue;
            };

            let row = FullLengthRow {
                row_id: record.row_id.clone(),
                nt_sequence: sequence,
            };
            match record.frame_type {
                Some(frame) if frame.is_productive() => result.productive.push(row.clone()),
                Some(FrameType::Out | FrameType::Stop) => result.unproductive.push(row.clone()),
                _ => {}
            }
            result.all.push(row);
            result.summary.reconstructed += 1;
        }

        Ok(result)
    }

    ///
    /// The CDR3 part of a read: the `cdr3_length` nucleotides that end at the
    /// trim offset. Reads shorter than the offset are cut at their end.
    ///
    pub fn trim<'a>(&self, record: &'a RepertoireRecord) -> ExtractResult<&'a str> {
        let offset = self.settings.trim_offset;
        let start = offset
            .checked_sub(record.cdr3_length)
            .ok_or_else(|| ExtractError::CdrLengthOutOfRange {
                row_id: record.row_id.clone(),
                length: record.cdr3_length,
                offset,
            })?;
        let end = offset.min(record.nt_sequence.len());
        Ok(record.nt_sequence.get(start..end).unwrap_or(""))
    }

    fn check_lengths(&self, records: &[RepertoireRecord]) -> ExtractResult<()> {
        match records
            .iter()
            .find(|r| r.cdr3_length > self.settings.trim_offset)
        {
            Some(record) => Err(ExtractError::CdrLengthOutOfRange {
                row_id: record.row_id.clone(),
                length: record.cdr3_length,
                offset: self.settings.trim_offset,
            }),
            None => Ok(()),
        }
    }

    fn lookup<'a>(
        &self,
        references: &ReferenceGenes,
        value: Option<&'a str>,
        cache: &mut HashMap<&'a str, Vec<usize>>,
    ) -> ExtractResult<Vec<usize>> {
        let Some(value) = value else {
            return Ok(Vec::new());
        };
        if let Some(hit) = cache.get(value) {
            return Ok(hit.clone());
        }
        let found = references.candidate_indices(
            value,
            self.settings.use_allele,
            &self.settings.default_allele,
        )?;
        cache.insert(value, found.clone());
        Ok(found)
    }

    fn choice(&self, references: &ReferenceGenes, indices: &[usize]) -> Option<String> {
        if indices.is_empty() {
            return None;
        }
        let names: Vec<&str> = indices
            .iter()
            .filter_map(|&i| references.get(i))
            .map(|gene| gene.name.as_str())
            .collect();
        Some(names.join(CANDIDATE_SEPARATOR))
    }
}

///
/// Splice a CDR3 fragment between its V and J reference genes.
///
/// The V gene is cut before the last occurrence of its longest overlap with
/// the fragment and the J gene after the first occurrence of its own overlap.
/// `None` when either overlap is empty, when the V part left after the
/// overlap is at least as long as the part before it, or when the J part
/// before the overlap is at least as long as the part after it.
///
pub fn splice(v_sequence: &str, j_sequence: &str, fragment: &str) -> Option<String> {
    let vd = find_longest_substring(v_sequence, fragment);
    let dj = find_longest_substring(j_sequence, fragment);
    if vd.is_empty() || dj.is_empty() {
        return None;
    }

    let (v_left, v_right) = v_sequence.rsplit_once(vd)?;
    let (j_left, j_right) = j_sequence.split_once(dj)?;
    if v_right.len() >= v_left.len() || j_left.len() >= j_right.len() {
        return None;
    }

    Some(format!("{}{}{}", v_left, fragment, j_right))
}

#[cfg(test)]
mod tests {
    use super::*;

    use immunoprobs_core::models::{GermlineGene, GermlineGenes};
    use pretty_assertions::assert_eq;
    use rstest::*;

    const V_SEQ: &str = "GATGCTGAAATCACCCAGAGCCCAAGACACAAGATCACAGAGACAGGTGTGCCAGCAGC";
    const J_SEQ: &str = "ACTGAAGCTTTCTTTGGACAAGGCACCAGACTCACAGTTGTAG";

    fn record(row_id: &str, nt: &str, cdr3_length: usize, frame: Option<FrameType>) -> RepertoireRecord {
        RepertoireRecord {
            row_id: row_id.to_string(),
            nt_sequence: nt.to_string(),
            aa_sequence: None,
            frame_type: frame,
            cdr3_length,
            v_resolved: Some("TRBV05-01*01".to_string()),
            j_resolved: Some("TRBJ01-01".to_string()),
        }
    }

    #[fixture]
    fn extractor() -> SequenceExtractor {
        let v: GermlineGenes = vec![GermlineGene::new("TRBV5-1*01", V_SEQ)].into_iter().collect();
        let j: GermlineGenes = vec![GermlineGene::new("TRBJ1-1*01", J_SEQ)].into_iter().collect();
        SequenceExtractor::new(v.into(), j.into(), ExtractSettings::default())
    }

    #[rstest]
    fn test_splice_rebuilds_full_length() {
        let fragment = "TGTGCCAGCAGCTTAGCACTGAAGCTTTC";
        let spliced = splice(V_SEQ, J_SEQ, fragment).unwrap();
        assert!(spliced.contains(fragment));
        assert_eq!(
            spliced,
            format!("{}{}{}", &V_SEQ[..V_SEQ.len() - 12], fragment, &J_SEQ[12..])
        );
    }

    #[rstest]
    fn test_splice_rejects_long_v_remainder() {
        // overlaps the start of V, leaving most of V to the right of the cut
        let fragment = "GCTGAAATCACCCAGCACTGAAGCTTTC";
        assert_eq!(splice(V_SEQ, J_SEQ, fragment), None);
    }

    #[rstest]
    fn test_splice_rejects_long_j_remainder() {
        // overlaps the end of J, leaving nothing of J to the right of the cut
        let fragment = "TGTGCCAGCAGCTTAGCAGACTCACAGTTGTAG";
        assert_eq!(splice(V_SEQ, J_SEQ, fragment), None);
    }

    #[rstest]
    fn test_j_side_rejection_keeps_cdr3_row(extractor: SequenceExtractor) {
        let fragment = "TGTGCCAGCAGCTTAGCAGACTCACAGTTGTAG";
        let nt = format!("{}{}", "A".repeat(81 - fragment.len()), fragment);
        let rows = vec![record("j", &nt, fragment.len(), Some(FrameType::In))];
        let result = extractor.reassemble_chunk(&rows).unwrap();

        assert_eq!(result.cdr3.len(), 1);
        assert_eq!(result.cdr3[0].nt_sequence, fragment);
        assert!(result.all.is_empty());
        assert!(result.productive.is_empty());
        assert_eq!(result.summary.rejected, 1);
    }

    #[rstest]
    fn test_splice_rejects_empty_fragment() {
        assert_eq!(splice(V_SEQ, J_SEQ, ""), None);
    }

    #[rstest]
    #[case(81, "ACGTACGTAC", 5, "")]
    #[case(8, "ACGTACGTAC", 5, "TACGT")]
    #[case(8, "ACGTACGTAC", 0, "")]
    #[case(12, "ACGTACGTAC", 4, "AC")]
    fn test_trim(
        mut extractor: SequenceExtractor,
        #[case] offset: usize,
        #[case] nt: &str,
        #[case] cdr3_length: usize,
        #[case] expected: &str,
    ) {
        extractor.settings.trim_offset = offset;
        let record = record("0", nt, cdr3_length, None);
        assert_eq!(extractor.trim(&record).unwrap(), expected);
    }

    #[rstest]
    fn test_cdr3_length_above_offset_aborts(extractor: SequenceExtractor) {
        let pool = WorkerPool::with_threads(2).unwrap();
        let records = vec![record("0", "ACGT", 82, None)];
        assert!(matches!(
            extractor.extract(&records, &pool),
            Err(ExtractError::CdrLengthOutOfRange { length: 82, offset: 81, .. })
        ));
    }

    #[rstest]
    fn test_frame_type_routing(extractor: SequenceExtractor) {
        let fragment = "TGTGCCAGCAGCTTAGCACTGAAGCTTTC";
        let nt = format!("{}{}", "A".repeat(81 - fragment.len()), fragment);
        let records = vec![
            record("a", &nt, fragment.len(), Some(FrameType::In)),
            record("b", &nt, fragment.len(), Some(FrameType::Out)),
            record("c", &nt, fragment.len(), Some(FrameType::Stop)),
            record("d", &nt, fragment.len(), None),
        ];
        let result = extractor.reassemble_chunk(&records).unwrap();

        let ids = |rows: &[FullLengthRow]| rows.iter().map(|r| r.row_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&result.productive), vec!["a"]);
        assert_eq!(ids(&result.unproductive), vec!["b", "c"]);
        assert_eq!(ids(&result.all), vec!["a", "b", "c", "d"]);
        assert_eq!(result.cdr3.len(), 4);
        assert_eq!(result.cdr3[0].v_gene_choice.as_deref(), Some("TRBV5-1*01"));
        assert_eq!(result.summary.reconstructed, 4);
    }

    #[rstest]
    fn test_unmatched_gene_only_in_cdr3(extractor: SequenceExtractor) {
        let mut unmatched = record("x", "ACGTACGT", 4, Some(FrameType::In));
        unmatched.v_resolved = Some("TRBV30-01".to_string());
        let mut missing = record("y", "ACGTACGT", 4, Some(FrameType::In));
        missing.j_resolved = None;

        let result = extractor.reassemble_chunk(&[unmatched, missing]).unwrap();
        assert_eq!(result.cdr3.len(), 2);
        assert_eq!(result.cdr3[0].v_gene_choice, None);
        assert_eq!(result.cdr3[1].j_gene_choice, None);
        assert!(result.all.is_empty());
        assert_eq!(result.summary.unmatched, 2);
    }

    #[rstest]
    fn test_malformed_gene_aborts(extractor: SequenceExtractor) {
        let mut bad = record("x", "ACGTACGT", 4, Some(FrameType::In));
        bad.v_resolved = Some("unresolved".to_string());
        assert!(matches!(
            extractor.reassemble_chunk(&[bad]),
            Err(ExtractError::MalformedGene(_))
        ));
    }
}
