use std::fmt::{self, Display};
use std::fs::read_to_string;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::errors::{ConfigError, ConfigResult};
use crate::utils::parse_separator;

///
/// Number of workers a [crate::parallel::WorkerPool] may use. Always at least one.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadCount(NonZeroUsize);

impl ThreadCount {
    pub fn new(value: usize) -> ConfigResult<Self> {
        NonZeroUsize::new(value)
            .map(ThreadCount)
            .ok_or_else(|| ConfigError::InvalidThreadCount(value.to_string()))
    }

    /// All threads the machine reports, or one when that can't be determined.
    pub fn available() -> Self {
        ThreadCount(std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl FromStr for ThreadCount {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidThreadCount(s.to_string()))?;
        ThreadCount::new(value)
    }
}

impl TryFrom<i64> for ThreadCount {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value =
            usize::try_from(value).map_err(|_| ConfigError::InvalidThreadCount(value.to_string()))?;
        ThreadCount::new(value)
    }
}

impl Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BasicSettings {
    pub separator: String,
    pub threads: Option<i64>,
    pub working_dir: PathBuf,
    pub out_name: String,
}

impl Default for BasicSettings {
    fn default() -> Self {
        BasicSettings {
            separator: char::from(DEFAULT_SEPARATOR).to_string(),
            threads: None,
            working_dir: PathBuf::from("."),
            out_name: String::new(),
        }
    }
}

///
/// Column names used when reading a repertoire table and writing the
/// CDR3 / full length tables.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub row_id: String,
    pub nt_sequence: String,
    pub aa_sequence: String,
    pub frame_type: String,
    pub cdr3_length: String,
    pub v_resolved: String,
    pub j_resolved: String,
    pub v_gene_choice: String,
    pub j_gene_choice: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            row_id: ROW_ID_COL.to_string(),
            nt_sequence: NT_COL.to_string(),
            aa_sequence: AA_COL.to_string(),
            frame_type: FRAME_TYPE_COL.to_string(),
            cdr3_length: CDR3_LENGTH_COL.to_string(),
            v_resolved: V_RESOLVED_COL.to_string(),
            j_resolved: J_RESOLVED_COL.to_string(),
            v_gene_choice: V_GENE_CHOICE_COL.to_string(),
            j_gene_choice: J_GENE_CHOICE_COL.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractSettings {
    /// Amplicon coordinate at which every CDR3 fragment ends.
    pub trim_offset: usize,
    pub use_allele: bool,
    pub default_allele: String,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        ExtractSettings {
            trim_offset: DEFAULT_TRIM_OFFSET,
            use_allele: true,
            default_allele: DEFAULT_ALLELE.to_string(),
        }
    }
}

///
/// Settings shared by every command. Built once (defaults, then an optional
/// TOML file, then command line overrides) and passed down explicitly.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub basic: BasicSettings,
    pub columns: ColumnNames,
    pub extract: ExtractSettings,
}

impl TryFrom<&Path> for Config {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: Config = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    ///
    /// Check every setting that can be wrong before any work starts.
    ///
    pub fn validate(&self) -> ConfigResult<()> {
        self.separator()?;
        self.threads()?;
        if !self.basic.working_dir.is_dir() {
            return Err(ConfigError::MissingDirectory(
                self.basic.working_dir.display().to_string(),
            ));
        }
        Ok(())
    }

    pub fn separator(&self) -> ConfigResult<u8> {
        parse_separator(&self.basic.separator)
    }

    pub fn threads(&self) -> ConfigResult<ThreadCount> {
        match self.basic.threads {
            Some(n) => ThreadCount::try_from(n),
            None => Ok(ThreadCount::available()),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.basic.working_dir
    }

    /// Output name prefix with all whitespace removed.
    pub fn out_name(&self) -> String {
        self.basic
            .out_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    pub fn set_separator(&mut self, value: &str) -> ConfigResult<()> {
        parse_separator(value)?;
        self.basic.separator = value.to_string();
        Ok(())
    }

    pub fn set_threads(&mut self, value: &str) -> ConfigResult<()> {
        let threads = ThreadCount::from_str(value)?;
        self.basic.threads = Some(threads.get() as i64);
        Ok(())
    }

    pub fn set_working_dir(&mut self, value: &Path) -> ConfigResult<()> {
        if !value.is_dir() {
            return Err(ConfigError::MissingDirectory(value.display().to_string()));
        }
        self.basic.working_dir = value.to_path_buf();
        Ok(())
    }

    pub fn set_out_name(&mut self, value: &str) {
        self.basic.out_name = value.to_string();
    }
}
