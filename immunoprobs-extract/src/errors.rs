use thiserror::Error;

use immunoprobs_core::errors::{ConfigError, FormatError};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Resolved gene needs to look like '<locus><family>[-<gene>][*<allele>]': '{0}'")]
    MalformedGene(String),

    #[error("CDR3 length {length} on row '{row_id}' is larger than the trim offset {offset}")]
    CdrLengthOutOfRange {
        row_id: String,
        length: usize,
        offset: usize,
    },

    #[error("Number of random sequences should be higher than 0 and at most {available}: {requested}")]
    InvalidSampleSize { requested: usize, available: usize },

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
