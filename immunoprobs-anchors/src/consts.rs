pub const DEFAULT_OUT_NAME: &str = "gene_CDR3_anchors";
pub const DEFAULT_MUSCLE_BIN: &str = "muscle";

pub const GENE_COL: &str = "gene";
pub const ANCHOR_INDEX_COL: &str = "anchor_index";
pub const FUNCTION_COL: &str = "function";
pub const MOTIF_COL: &str = "motif";
