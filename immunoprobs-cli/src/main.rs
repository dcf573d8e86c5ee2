mod anchors;
mod extract;
mod settings;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "immunoprobs";
    pub const BIN_NAME: &str = "immunoprobs";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Prepare V(D)J sequences and germline anchors for generation probability models (OLGA, IGoR).")
        .subcommand_required(true)
        .args(settings::global_args())
        .subcommand(anchors::cli::create_locate_cli())
        .subcommand(extract::cli::create_extract_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // CDR3 ANCHORS
        //
        Some((anchors::cli::LOCATE_CMD, matches)) => {
            settings::init_logging(matches);
            anchors::handlers::run_locate(matches)?;
        }

        //
        // SEQUENCE EXTRACTION
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            settings::init_logging(matches);
            extract::handlers::run_extract(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
