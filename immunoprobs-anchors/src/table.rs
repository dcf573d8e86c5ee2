use std::collections::HashSet;
use std::path::{Path, PathBuf};

use immunoprobs_core::errors::FormatResult;
use immunoprobs_core::io::write_table;
use immunoprobs_core::models::GeneRole;
use immunoprobs_core::utils::{separator_extension, unique_output_path};

use crate::consts::*;

///
/// Position of a conserved motif within one germline gene.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MotifLocation {
    pub gene: String,
    /// Non-gap characters preceding the motif's alignment column.
    pub anchor_index: usize,
    pub function: String,
    pub motif: String,
}

///
/// Ordered collection of [MotifLocation]s without exact duplicates.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorTable {
    rows: Vec<MotifLocation>,
}

impl AnchorTable {
    ///
    /// Build a table, dropping exact duplicate rows (first occurrence wins).
    ///
    pub fn from_rows(rows: Vec<MotifLocation>) -> Self {
        let mut seen = HashSet::with_capacity(rows.len());
        let rows = rows
            .into_iter()
            .filter(|row| seen.insert(row.clone()))
            .collect();
        AnchorTable { rows }
    }

    ///
    /// Keep only the first row for every gene, so each gene reports exactly
    /// one anchor.
    ///
    pub fn dedup_by_gene(self) -> Self {
        let mut seen = HashSet::with_capacity(self.rows.len());
        let rows = self
            .rows
            .into_iter()
            .filter(|row| seen.insert(row.gene.clone()))
            .collect();
        AnchorTable { rows }
    }

    pub fn rows(&self) -> &[MotifLocation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MotifLocation> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    ///
    /// Write the table in the anchor file layout expected by OLGA:
    /// `gene`, `anchor_index`, `function`, `motif`.
    ///
    pub fn write<P: AsRef<Path>>(&self, path: P, separator: u8) -> FormatResult<usize> {
        let rows = self.rows.iter().map(|row| {
            vec![
                Some(row.gene.clone()),
                Some(row.anchor_index.to_string()),
                Some(row.function.clone()),
                Some(row.motif.clone()),
            ]
        });
        write_table(
            path,
            separator,
            &[GENE_COL, ANCHOR_INDEX_COL, FUNCTION_COL, MOTIF_COL],
            rows,
        )
    }

    ///
    /// Write to `<directory>/<ROLE>_<out_name>.<ext>`, never overwriting an
    /// existing file. An empty `out_name` falls back to `gene_CDR3_anchors`.
    ///
    pub fn write_to_dir(
        &self,
        directory: &Path,
        role: GeneRole,
        out_name: &str,
        separator: u8,
    ) -> FormatResult<PathBuf> {
        let out_name = if out_name.is_empty() {
            DEFAULT_OUT_NAME
        } else {
            out_name
        };
        let path = unique_output_path(
            directory,
            &format!("{}_{}", role, out_name),
            separator_extension(separator),
        );
        self.write(&path, separator)?;
        Ok(path)
    }
}

impl IntoIterator for AnchorTable {
    type Item = MotifLocation;
    type IntoIter = std::vec::IntoIter<MotifLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn location(gene: &str, anchor_index: usize, motif: &str) -> MotifLocation {
        MotifLocation {
            gene: gene.to_string(),
            anchor_index,
            function: "F".to_string(),
            motif: motif.to_string(),
        }
    }

    #[rstest]
    fn test_from_rows_drops_exact_duplicates() {
        let table = AnchorTable::from_rows(vec![
            location("TRBV1*01", 30, "TGT"),
            location("TRBV1*01", 30, "TGT"),
            location("TRBV1*01", 30, "TGC"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].motif, "TGC");
    }

    #[rstest]
    fn test_dedup_by_gene_keeps_first() {
        let table = AnchorTable::from_rows(vec![
            location("TRBJ1-1*01", 17, "TTT"),
            location("TRBJ1-2*01", 18, "TTT"),
            location("TRBJ1-1*01", 19, "TGG"),
        ])
        .dedup_by_gene();
        assert_eq!(
            table.rows(),
            &[location("TRBJ1-1*01", 17, "TTT"), location("TRBJ1-2*01", 18, "TTT")]
        );
    }

    #[rstest]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let table = AnchorTable::from_rows(vec![location("TRBV1*01", 30, "TGT")]);

        let path = table.write_to_dir(dir.path(), GeneRole::V, "", b'\t').unwrap();
        assert_eq!(path, dir.path().join("V_gene_CDR3_anchors.tsv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "gene\tanchor_index\tfunction\tmotif\nTRBV1*01\t30\tF\tTGT\n");

        let second = table.write_to_dir(dir.path(), GeneRole::V, "", b'\t').unwrap();
        assert_eq!(second, dir.path().join("V_gene_CDR3_anchors_1.tsv"));

        let custom = table.write_to_dir(dir.path(), GeneRole::J, "run1", b',').unwrap();
        assert_eq!(custom, dir.path().join("J_run1.csv"));
    }
}
