use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use immunoprobs_core::io::{parse_fasta, read_fasta};
use immunoprobs_core::models::Alignment;

use crate::consts::DEFAULT_MUSCLE_BIN;
use crate::errors::{AnchorError, AnchorResult};

///
/// Anything that turns a FASTA file of germline genes into a gapped
/// multiple alignment.
///
pub trait AlignmentProvider {
    fn align(&self, fasta: &Path) -> AnchorResult<Alignment>;
}

///
/// Runs the external MUSCLE aligner and parses the aligned FASTA it writes to
/// stdout.
///
#[derive(Debug, Clone)]
pub struct MuscleAligner {
    binary: PathBuf,
}

impl Default for MuscleAligner {
    fn default() -> Self {
        MuscleAligner {
            binary: PathBuf::from(DEFAULT_MUSCLE_BIN),
        }
    }
}

impl MuscleAligner {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        MuscleAligner {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl AlignmentProvider for MuscleAligner {
    fn align(&self, fasta: &Path) -> AnchorResult<Alignment> {
        info!("Aligning {} with {}", fasta.display(), self.binary.display());

        let output = Command::new(&self.binary)
            .arg("-in")
            .arg(fasta)
            .arg("-quiet")
            .output()
            .map_err(|e| {
                AnchorError::Aligner(format!("could not run '{}': {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(AnchorError::Aligner(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let records = parse_fasta(output.stdout.as_slice(), &fasta.to_string_lossy())?;
        debug!("Aligner returned {} sequences", records.len());
        Ok(Alignment::try_from(records)?)
    }
}

/// Reads a FASTA file that is already aligned.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastaAlignment;

impl AlignmentProvider for FastaAlignment {
    fn align(&self, fasta: &Path) -> AnchorResult<Alignment> {
        let records = read_fasta(fasta)?;
        Ok(Alignment::try_from(records)?)
    }
}
