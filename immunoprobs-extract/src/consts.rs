/// Suffixes appended to the output prefix for the four extraction tables.
pub const CDR3_SUFFIX: &str = "CDR3";
pub const PRODUCTIVE_SUFFIX: &str = "full_length_productive";
pub const UNPRODUCTIVE_SUFFIX: &str = "full_length_unproductive";
pub const ALL_SUFFIX: &str = "full_length";

/// Joins multiple reference candidates in a gene choice cell.
pub const CANDIDATE_SEPARATOR: &str = "|";

/// Seed for `--n-random` subsampling, so repeated runs pick the same rows.
pub const SAMPLE_SEED: u64 = 1;
