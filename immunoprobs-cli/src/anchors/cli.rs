use clap::{Arg, ArgAction, Command};

use immunoprobs_anchors::consts::DEFAULT_MUSCLE_BIN;

pub const LOCATE_CMD: &str = "locate-cdr3-anchors";
pub const TEMPLATES_DIR: &str = "genomic_templates";

pub fn create_locate_cli() -> Command {
    Command::new(LOCATE_CMD)
        .about("Align germline reference genes and locate the conserved CDR3 anchor motifs.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("ref")
                .long("ref")
                .num_args(2)
                .value_names(["GENE", "FASTA"])
                .action(ArgAction::Append)
                .required(true)
                .help("A gene role (V or J) followed by an IMGT reference FASTA file ('|' separated headers, gene on index 1, function on index 3)"),
        )
        .arg(
            Arg::new("motif")
                .long("motif")
                .action(ArgAction::Append)
                .help("Motif to look for, repeatable (default: TGT and TGC for V, TGG, TTT and TTC for J)"),
        )
        .arg(
            Arg::new("aligned")
                .long("aligned")
                .action(ArgAction::SetTrue)
                .help("The FASTA files are already aligned, skip running MUSCLE"),
        )
        .arg(
            Arg::new("muscle")
                .long("muscle")
                .value_name("BIN")
                .default_value(DEFAULT_MUSCLE_BIN)
                .help("MUSCLE executable used to align the reference genes"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_repeated_refs() {
        let matches = create_locate_cli()
            .try_get_matches_from([
                LOCATE_CMD, "--ref", "V", "TRBV.fasta", "--ref", "J", "TRBJ.fasta", "--motif", "tgt",
            ])
            .unwrap();

        let refs: Vec<Vec<&String>> = matches
            .get_occurrences::<String>("ref")
            .unwrap()
            .map(Iterator::collect)
            .collect();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1][0], "J");
        assert_eq!(refs[1][1], "TRBJ.fasta");
        assert_eq!(matches.get_one::<String>("muscle").unwrap(), "muscle");
    }

    #[rstest]
    fn test_ref_needs_two_values() {
        assert!(
            create_locate_cli()
                .try_get_matches_from([LOCATE_CMD, "--ref", "V"])
                .is_err()
        );
    }
}
