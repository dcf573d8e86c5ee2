//! # CDR3 anchor locator
//!
//! Finds the conserved Cysteine (V genes) and Tryptophan/Phenylalanine
//! (J genes) codons that bound the CDR3 region, using a multiple alignment
//! of the germline genes. The output is the anchor table OLGA expects:
//! one row per gene with its ungapped anchor index, functionality and motif.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use immunoprobs_anchors::aligner::{AlignmentProvider, MuscleAligner};
//! use immunoprobs_anchors::locator::AnchorLocator;
//!
//! let alignment = MuscleAligner::default().align(Path::new("TRBV.fasta")).unwrap();
//! let locator = AnchorLocator::new(alignment, "V").unwrap();
//! let anchors = locator.locate(&[]).unwrap().dedup_by_gene();
//! anchors.write("V_gene_CDR3_anchors.tsv", b'\t').unwrap();
//! ```
pub mod aligner;
pub mod consts;
pub mod errors;
pub mod locator;
pub mod table;

// re-exports
pub use aligner::{AlignmentProvider, FastaAlignment, MuscleAligner};
pub use errors::{AnchorError, AnchorResult};
pub use locator::AnchorLocator;
pub use table::{AnchorTable, MotifLocation};
