use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::errors::{ConfigError, ConfigResult};

///
/// Open a FASTA or table file for buffered reading. Files ending in `.gz`
/// are decompressed on the fly.
///
pub fn get_dynamic_reader(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Cannot open '{}': {}", path.display(), e))
    })?;
    let inner: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(BufReader::new(inner))
}

///
/// Build an output path that does not clobber an existing file.
///
/// `<dir>/<stem>.<ext>` is returned when free, otherwise `_1`, `_2`, ... is
/// appended to the stem until an unused name is found.
///
pub fn unique_output_path(directory: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = directory.join(format!("{}.{}", stem, extension));
    let mut count = 1;
    while candidate.exists() {
        candidate = directory.join(format!("{}_{}.{}", stem, count, extension));
        count += 1;
    }
    candidate
}

///
/// Parse a user supplied field separator.
///
/// Accepts a single ASCII character or the escapes `\t` / `tab`. The `|`
/// character is reserved for IMGT headers and gene-choice strings.
///
pub fn parse_separator(value: &str) -> ConfigResult<u8> {
    let sep = match value {
        "\\t" | "tab" | "\t" => b'\t',
        "," | "comma" => b',',
        other if other.len() == 1 && other.is_ascii() => other.as_bytes()[0],
        other => return Err(ConfigError::InvalidSeparator(other.to_string())),
    };
    if sep == b'|' {
        return Err(ConfigError::InvalidSeparator(value.to_string()));
    }
    Ok(sep)
}

/// File extension matching a separator, `tsv` for tabs and `csv` otherwise.
pub fn separator_extension(sep: u8) -> &'static str {
    match sep {
        b'\t' => "tsv",
        _ => "csv",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::{BufRead, Write};

    #[rstest]
    #[case("\\t", b'\t')]
    #[case("tab", b'\t')]
    #[case(",", b',')]
    #[case(";", b';')]
    fn test_parse_separator(#[case] value: &str, #[case] expected: u8) {
        assert_eq!(parse_separator(value).unwrap(), expected);
    }

    #[rstest]
    #[case("|")]
    #[case("::")]
    #[case("")]
    fn test_parse_separator_rejects(#[case] value: &str) {
        assert!(matches!(
            parse_separator(value),
            Err(ConfigError::InvalidSeparator(_))
        ));
    }

    #[rstest]
    fn test_unique_output_path_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_output_path(dir.path(), "V_gene_CDR3_anchors", "tsv");
        assert_eq!(first, dir.path().join("V_gene_CDR3_anchors.tsv"));

        File::create(&first).unwrap();
        let second = unique_output_path(dir.path(), "V_gene_CDR3_anchors", "tsv");
        assert_eq!(second, dir.path().join("V_gene_CDR3_anchors_1.tsv"));

        File::create(&second).unwrap();
        let third = unique_output_path(dir.path(), "V_gene_CDR3_anchors", "tsv");
        assert_eq!(third, dir.path().join("V_gene_CDR3_anchors_2.tsv"));
    }

    #[rstest]
    fn test_get_dynamic_reader_gz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.fasta.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b">a\nACGT\n").unwrap();
        encoder.finish().unwrap();

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec![">a".to_string(), "ACGT".to_string()]);
    }
}
