use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The number of threads needs to be an integer higher than zero: '{0}'")]
    InvalidThreadCount(String),

    #[error("The separator needs to be a single character other than '|': '{0}'")]
    InvalidSeparator(String),

    #[error("Gene identifier can be either 'V' or 'J': '{0}'")]
    InvalidGeneRole(String),

    #[error("The working directory needs to be an existing directory: '{0}'")]
    MissingDirectory(String),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("FASTA header needs to be separated by '|' with a field on index {index}: '{header}'")]
    HeaderFieldMissing { header: String, index: usize },

    #[error("Column not found in the input table: '{0}'")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}' on row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Alignment rows need to share the same width: '{id}' has {found}, expected {expected}")]
    UnequalAlignment {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("No sequences found in file: {0}")]
    EmptyFile(String),

    #[error("Sequence data found before the first FASTA header in: {0}")]
    MissingHeader(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type FormatResult<T> = std::result::Result<T, FormatError>;
