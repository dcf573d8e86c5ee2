use regex::escape;

use crate::errors::{ExtractError, ExtractResult};

///
/// Build the regex patterns that select reference alleles for a free-text
/// resolved gene call such as `TRBV05-01*02` or `TRBV5-01/4-04*09`.
///
/// The locus and segment letters are stripped, every `/` separated
/// alternative yields its own pattern and leading zeros are removed from the
/// family and gene numbers. The allele of the call is only used when
/// `use_allele` is set, otherwise `default_allele` is. A gene number of `1`
/// also accepts the family without gene qualifier (`5\-1\*01$|5\*01$`), since
/// single member families are named without one. Every pattern is anchored to
/// the end of the reference identifier.
///
/// # Arguments
///
/// - value: the resolved gene call
/// - use_allele: keep the allele of the call when present
/// - default_allele: allele used otherwise
///
/// # Errors
///
/// [ExtractError::MalformedGene] when no family can be found, or when an
/// alternative, gene or allele part is empty.
///
pub fn build_resolved_pattern(
    value: &str,
    use_allele: bool,
    default_allele: &str,
) -> ExtractResult<Vec<String>> {
    let malformed = || ExtractError::MalformedGene(value.to_string());

    let body = strip_locus(value.trim());
    let (designation, allele) = match body.split_once('*') {
        Some((_, "")) => return Err(malformed()),
        Some((designation, allele)) => (designation, Some(allele)),
        None => (body, None),
    };
    let allele = match allele {
        Some(allele) if use_allele => allele,
        _ => default_allele,
    };

    let mut patterns = Vec::new();
    for alternative in designation.split('/') {
        let alternative = strip_locus(alternative);
        if alternative.is_empty() {
            return Err(malformed());
        }

        let pattern = match alternative.split_once('-') {
            Some((family, gene)) => {
                if family.is_empty() || gene.is_empty() {
                    return Err(malformed());
                }
                let family = strip_zeros(family);
                let gene = strip_zeros(gene);
                let full = anchored(&format!("{}-{}*{}", family, gene, allele));
                if gene == "1" {
                    format!("{}|{}", full, anchored(&format!("{}*{}", family, allele)))
                } else {
                    full
                }
            }
            None => anchored(&format!("{}*{}", strip_zeros(alternative), allele)),
        };
        patterns.push(pattern);
    }

    Ok(patterns)
}

fn strip_locus(value: &str) -> &str {
    value.trim_start_matches(|c: char| c.is_ascii_alphabetic())
}

fn strip_zeros(value: &str) -> &str {
    match value.trim_start_matches('0') {
        "" => "0",
        stripped => stripped,
    }
}

fn anchored(literal: &str) -> String {
    format!("{}$", escape(literal))
}
