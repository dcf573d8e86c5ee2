pub const DEFAULT_SEPARATOR: u8 = b'\t';
pub const NA_VALUE: &str = "na";
pub const COMMENT_CHAR: u8 = b'#';

/// IMGT header positions (after splitting on `|`).
pub const HEADER_SEPARATOR: char = '|';
pub const HEADER_GENE_FIELD: usize = 1;
pub const HEADER_FUNCTION_FIELD: usize = 3;

pub const GAP_CHAR: u8 = b'-';
pub const IMGT_GAP_CHAR: char = '.';

pub const DEFAULT_TRIM_OFFSET: usize = 81;
pub const DEFAULT_ALLELE: &str = "01";

pub const ROW_ID_COL: &str = "row_id";
pub const NT_COL: &str = "nt_sequence";
pub const AA_COL: &str = "aa_sequence";
pub const FRAME_TYPE_COL: &str = "frame_type";
pub const CDR3_LENGTH_COL: &str = "cdr3_length";
pub const V_RESOLVED_COL: &str = "v_resolved";
pub const J_RESOLVED_COL: &str = "j_resolved";
pub const V_GENE_CHOICE_COL: &str = "v_gene_choice";
pub const J_GENE_CHOICE_COL: &str = "j_gene_choice";
