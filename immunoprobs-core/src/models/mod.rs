pub mod alignment;
pub mod gene_role;
pub mod germline;
pub mod header;
pub mod repertoire;

// re-export for cleaner imports
pub use self::alignment::{AlignedSequence, Alignment};
pub use self::gene_role::GeneRole;
pub use self::germline::{GeneTaxonomy, GermlineGene, GermlineGenes};
pub use self::header::{GeneAnnotation, header_field};
pub use self::repertoire::{FrameType, RepertoireRecord};
