//! # Core models and utilities for immunoprobs
//!
//! This crate holds everything the anchor locator and the sequence extractor
//! share:
//!
//! - Explicit [config::Config] values (separator, worker count, column names, trimming)
//! - Models for alignments, IMGT headers, germline genes and repertoire rows
//! - FASTA and delimited-table readers/writers
//! - A fixed-size [parallel::WorkerPool] that shards work and concatenates results
//!
//! # Example
//!
//! ```no_run
//! use immunoprobs_core::io::read_fasta;
//! use immunoprobs_core::models::Alignment;
//!
//! let records = read_fasta("TRBJ_aligned.fasta").unwrap();
//! let alignment = Alignment::try_from(records).unwrap();
//! println!("{} rows, width {}", alignment.len(), alignment.width());
//! ```
pub mod config;
pub mod consts;
pub mod errors;
pub mod io;
pub mod models;
pub mod parallel;
pub mod utils;

// re-exports
pub use config::Config;
pub use errors::*;
pub use parallel::WorkerPool;
