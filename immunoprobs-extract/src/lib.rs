//! # Full length sequence extraction
//!
//! Immune repertoire exports (such as Adaptive ImmunoSEQ) report a short read
//! around the CDR3 together with free-text V and J gene calls. This crate
//! resolves those calls against IMGT reference genes and rebuilds full length
//! V(D)J nucleotide sequences by splicing the read between the matching V and
//! J genes, using the longest common substring as the overlap.
//!
//! The result is four tables: trimmed CDR3 reads with their reference
//! candidates, and full length productive, unproductive and combined
//! sequences.
//!
//! # Example
//!
//! ```no_run
//! use immunoprobs_core::config::Config;
//! use immunoprobs_core::io::DelimitedTable;
//! use immunoprobs_core::models::{GermlineGenes, RepertoireRecord};
//! use immunoprobs_core::WorkerPool;
//! use immunoprobs_extract::SequenceExtractor;
//!
//! let config = Config::default();
//! let v = GermlineGenes::from_fasta("TRBV.fasta").unwrap();
//! let j = GermlineGenes::from_fasta("TRBJ.fasta").unwrap();
//! let table = DelimitedTable::read("sequences.tsv", b'\t').unwrap();
//! let records = RepertoireRecord::from_table(&table, &config.columns).unwrap();
//!
//! let extractor = SequenceExtractor::new(v.into(), j.into(), config.extract.clone());
//! let pool = WorkerPool::from_config(&config).unwrap();
//! let result = extractor.extract(&records, &pool).unwrap();
//! println!("{}", result.summary);
//! ```
pub mod consts;
pub mod errors;
pub mod extractor;
pub mod lcs;
pub mod reference;
pub mod resolve;
pub mod sample;

// re-exports
pub use errors::{ExtractError, ExtractResult};
pub use extractor::{
    Cdr3Row, ExtractionResult, ExtractionSummary, FullLengthRow, OutputFiles, SequenceExtractor,
    splice,
};
pub use lcs::find_longest_substring;
pub use reference::ReferenceGenes;
pub use resolve::build_resolved_pattern;
pub use sample::sample_rows;
