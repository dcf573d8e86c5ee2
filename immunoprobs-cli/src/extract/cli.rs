use clap::{Arg, ArgAction, Command, value_parser};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Rebuild full length V(D)J sequences (productive, unproductive and combined) and trimmed CDR3 sequences from a repertoire table.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("seqs")
                .long("seqs")
                .value_name("TABLE")
                .required(true)
                .help("Separated input table with the sequences to extract"),
        )
        .arg(
            Arg::new("ref-v")
                .long("ref-v")
                .value_name("FASTA")
                .required(true)
                .help("IMGT reference FASTA file with the V genes"),
        )
        .arg(
            Arg::new("ref-j")
                .long("ref-j")
                .value_name("FASTA")
                .required(true)
                .help("IMGT reference FASTA file with the J genes"),
        )
        .arg(
            Arg::new("n-random")
                .long("n-random")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Only use a random subset of N rows from the input table"),
        )
        .arg(
            Arg::new("trim-offset")
                .long("trim-offset")
                .value_name("POS")
                .value_parser(value_parser!(usize))
                .help("Read position at which every CDR3 ends (default: 81)"),
        )
        .arg(
            Arg::new("default-allele")
                .long("default-allele")
                .value_name("ALLELE")
                .help("Allele used when a gene call has none, or when --ignore-allele is set (default: 01)"),
        )
        .arg(
            Arg::new("ignore-allele")
                .long("ignore-allele")
                .action(ArgAction::SetTrue)
                .help("Always use the default allele instead of the one in the gene call"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_extract_args() {
        let matches = create_extract_cli()
            .try_get_matches_from([
                EXTRACT_CMD, "--seqs", "s.tsv", "--ref-v", "v.fasta", "--ref-j", "j.fasta", "--n-random", "5",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<usize>("n-random"), Some(&5));
        assert!(!matches.get_flag("ignore-allele"));
    }

    #[rstest]
    #[case("-3")]
    #[case("many")]
    fn test_n_random_must_be_a_count(#[case] n: &str) {
        let result = create_extract_cli().try_get_matches_from([
            EXTRACT_CMD, "--seqs", "s.tsv", "--ref-v", "v.fasta", "--ref-j", "j.fasta", "--n-random", n,
        ]);
        assert!(result.is_err());
    }
}
