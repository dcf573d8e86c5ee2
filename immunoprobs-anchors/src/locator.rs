use std::str::FromStr;

use log::debug;

use immunoprobs_core::WorkerPool;
use immunoprobs_core::errors::FormatError;
use immunoprobs_core::models::{Alignment, GeneAnnotation, GeneRole};

use crate::errors::{AnchorError, AnchorResult};
use crate::table::{AnchorTable, MotifLocation};

///
/// Finds the alignment column where a conserved codon is most consistently
/// present and reports, for every gene carrying the codon there, the
/// ungapped index of that column.
///
#[derive(Debug, Clone)]
pub struct AnchorLocator {
    alignment: Alignment,
    role: GeneRole,
}

impl AnchorLocator {
    ///
    /// Create a locator for the given alignment.
    ///
    /// # Arguments
    ///
    /// - alignment: the gapped multiple alignment of germline genes
    /// - gene: gene role tag, `V` or `J` (case-insensitive)
    ///
    pub fn new(alignment: Alignment, gene: &str) -> AnchorResult<Self> {
        let role = GeneRole::from_str(gene)?;
        Ok(AnchorLocator::with_role(alignment, role))
    }

    pub fn with_role(alignment: Alignment, role: GeneRole) -> Self {
        AnchorLocator { alignment, role }
    }

    pub fn role(&self) -> GeneRole {
        self.role
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    ///
    /// Column with the highest fraction of rows matching `motif` exactly,
    /// together with that fraction. The first column wins on ties.
    ///
    /// Returns `None` when the motif is empty or wider than the alignment.
    ///
    pub fn conserved_column(&self, motif: &[u8]) -> Option<(usize, f64)> {
        let width = self.alignment.width();
        if motif.is_empty() || motif.len() > width {
            return None;
        }

        let mut best: Option<(usize, usize)> = None;
        for column in 0..=width - motif.len() {
            let count = self
                .alignment
                .iter()
                .filter(|row| row.window(column, motif.len()) == Some(motif))
                .count();
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((column, count)),
            }
        }

        best.map(|(column, count)| (column, count as f64 / self.alignment.len() as f64))
    }

    ///
    /// Locate a single motif: one [MotifLocation] per row whose window at the
    /// conserved column equals the motif, in alignment order.
    ///
    pub fn locate_motif(&self, motif: &str) -> AnchorResult<Vec<MotifLocation>> {
        let motif = normalize_motif(motif)?;
        let Some((column, _)) = self.conserved_column(motif.as_bytes()) else {
            return Ok(Vec::new());
        };

        let mut locations = Vec::new();
        for row in &self.alignment {
            if row.window(column, motif.len()) != Some(motif.as_bytes()) {
                continue;
            }
            let annotation = GeneAnnotation::from_header(&row.description).map_err(|e| match e {
                FormatError::HeaderFieldMissing { header, .. } => AnchorError::IndexNotFound(header),
                other => AnchorError::Format(other),
            })?;
            locations.push(MotifLocation {
                gene: annotation.gene,
                anchor_index: row.ungapped_position(column),
                function: annotation.function,
                motif: motif.clone(),
            });
        }
        Ok(locations)
    }

    ///
    /// Locate every motif in order and collect the rows into an
    /// [AnchorTable]. An empty motif list falls back to the role's default
    /// codons.
    ///
    pub fn locate(&self, motifs: &[&str]) -> AnchorResult<AnchorTable> {
        let motifs = self.motifs_or_default(motifs);
        let mut rows = Vec::new();
        for motif in motifs {
            rows.extend(self.locate_motif(motif)?);
        }
        Ok(AnchorTable::from_rows(rows))
    }

    ///
    /// Same as [AnchorLocator::locate], with motifs sharded over the worker
    /// pool. Results are gathered in motif order, so the table is identical
    /// to the serial one.
    ///
    pub fn locate_with_pool(&self, motifs: &[&str], pool: &WorkerPool) -> AnchorResult<AnchorTable> {
        let motifs = self.motifs_or_default(motifs);
        debug!(
            "Locating {} motif(s) in {} {} gene(s) using {} worker(s)",
            motifs.len(),
            self.alignment.len(),
            self.role,
            pool.num_workers(motifs.len())
        );

        let shards = pool.map_shards(&motifs, |shard| -> AnchorResult<Vec<MotifLocation>> {
            let mut rows = Vec::new();
            for motif in shard {
                rows.extend(self.locate_motif(motif)?);
            }
            Ok(rows)
        })?;

        let mut rows = Vec::new();
        for shard in shards {
            rows.extend(shard?);
        }
        Ok(AnchorTable::from_rows(rows))
    }

    fn motifs_or_default<'a>(&self, motifs: &[&'a str]) -> Vec<&'a str> {
        if motifs.is_empty() {
            self.role.default_motifs().to_vec()
        } else {
            motifs.to_vec()
        }
    }
}

fn normalize_motif(motif: &str) -> AnchorResult<String> {
    let motif = motif.trim().to_uppercase();
    if motif.is_empty() || motif.bytes().any(|c| c == b'-') {
        return Err(AnchorError::InvalidMotif(motif));
    }
    Ok(motif)
}
