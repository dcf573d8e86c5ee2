use thiserror::Error;

use immunoprobs_core::errors::{ConfigError, FormatError};

#[derive(Error, Debug)]
pub enum AnchorError {
    #[error(
        "FASTA header needs to be separated by '|', needs to have gene name on index 1 and function on index 3: '{0}'"
    )]
    IndexNotFound(String),

    #[error("Motif needs to be a non-empty nucleotide string: '{0}'")]
    InvalidMotif(String),

    #[error("An error occured with the aligner:\n{0}")]
    Aligner(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AnchorResult<T> = std::result::Result<T, AnchorError>;
