pub mod fasta;
pub mod table;

pub use fasta::*;
pub use table::*;
