use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::ConfigError;

/// Codons for Cysteine, the conserved V gene anchor.
pub const DEFAULT_V_MOTIFS: &[&str] = &["TGT", "TGC"];
/// Codons for Tryptophan and Phenylalanine, the conserved J gene anchors.
pub const DEFAULT_J_MOTIFS: &[&str] = &["TGG", "TTT", "TTC"];

/// The germline segment an alignment or reference table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneRole {
    V,
    J,
}

impl GeneRole {
    pub fn default_motifs(&self) -> &'static [&'static str] {
        match self {
            GeneRole::V => DEFAULT_V_MOTIFS,
            GeneRole::J => DEFAULT_J_MOTIFS,
        }
    }
}

impl FromStr for GeneRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "V" => Ok(GeneRole::V),
            "J" => Ok(GeneRole::J),
            _ => Err(ConfigError::InvalidGeneRole(s.to_string())),
        }
    }
}

impl Display for GeneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneRole::V => write!(f, "V"),
            GeneRole::J => write!(f, "J"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("V", GeneRole::V)]
    #[case("v", GeneRole::V)]
    #[case("j", GeneRole::J)]
    #[case(" J ", GeneRole::J)]
    fn test_from_str(#[case] value: &str, #[case] expected: GeneRole) {
        assert_eq!(GeneRole::from_str(value).unwrap(), expected);
    }

    #[rstest]
    #[case("X")]
    #[case("D")]
    #[case("VJ")]
    fn test_from_str_rejects(#[case] value: &str) {
        assert!(matches!(
            GeneRole::from_str(value),
            Err(ConfigError::InvalidGeneRole(_))
        ));
    }

    #[rstest]
    fn test_default_motifs() {
        assert_eq!(GeneRole::V.default_motifs(), &["TGT", "TGC"]);
        assert_eq!(GeneRole::J.default_motifs(), &["TGG", "TTT", "TTC"]);
    }
}
