use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::consts::IMGT_GAP_CHAR;
use crate::errors::{FormatError, FormatResult};
use crate::utils::{get_dynamic_reader, unique_output_path};

/// A single FASTA entry. `description` is the full header line without `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub description: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(description: impl Into<String>, sequence: impl Into<String>) -> Self {
        FastaRecord {
            description: description.into(),
            sequence: sequence.into(),
        }
    }
}

///
/// Read all records of a (optionally gzipped) FASTA file.
///
/// Sequence lines are joined and uppercased; blank lines are ignored.
///
/// # Errors
///
/// - the file can't be opened or read
/// - sequence data appears before the first header
/// - the file holds no records
///
pub fn read_fasta<P: AsRef<Path>>(path: P) -> FormatResult<Vec<FastaRecord>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;
    let records = parse_fasta(reader, &path.display().to_string())?;
    debug!("Read {} FASTA records from {}", records.len(), path.display());
    Ok(records)
}

///
/// Parse FASTA records from any buffered reader. `source` is only used in
/// error messages.
///
pub fn parse_fasta<R: BufRead>(reader: R, source: &str) -> FormatResult<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();

        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(FastaRecord::new(header.trim(), String::new()));
        } else if !line.trim().is_empty() {
            match current.as_mut() {
                Some(record) => record.sequence.push_str(&line.trim().to_ascii_uppercase()),
                None => return Err(FormatError::MissingHeader(source.to_string())),
            }
        }
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    if records.is_empty() {
        return Err(FormatError::EmptyFile(source.to_string()));
    }

    Ok(records)
}

///
/// Write records as FASTA, one sequence line per record.
///
pub fn write_fasta<P: AsRef<Path>>(path: P, records: &[FastaRecord]) -> FormatResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for record in records {
        writeln!(writer, ">{}", record.description)?;
        writeln!(writer, "{}", record.sequence)?;
    }
    writer.flush()?;
    Ok(())
}

///
/// Copy an IMGT reference FASTA into `directory` with the IMGT gap
/// characters (`.`) removed, so it can be fed to an aligner.
///
/// # Returns
///
/// The path of the written file, `<directory>/<file stem>.fasta` made unique
/// when it already exists.
///
pub fn preprocess_reference<P: AsRef<Path>>(input: P, directory: &Path) -> FormatResult<PathBuf> {
    let input = input.as_ref();
    let records: Vec<FastaRecord> = read_fasta(input)?
        .into_iter()
        .map(|r| {
            let sequence = r.sequence.chars().filter(|&c| c != IMGT_GAP_CHAR).collect::<String>();
            FastaRecord::new(r.description, sequence)
        })
        .collect();

    create_dir_all(directory)?;
    let stem = input
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim_end_matches(".gz"))
        .map(|n| n.split('.').next().unwrap_or(n))
        .filter(|n| !n.is_empty())
        .unwrap_or("reference");
    let output = unique_output_path(directory, stem, "fasta");
    write_fasta(&output, &records)?;

    debug!("Wrote {} ungapped reference sequences to {}", records.len(), output.display());
    Ok(output)
}
