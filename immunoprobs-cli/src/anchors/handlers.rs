use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use immunoprobs_anchors::{AlignmentProvider, AnchorLocator, FastaAlignment, MuscleAligner};
use immunoprobs_core::WorkerPool;
use immunoprobs_core::io::preprocess_reference;
use immunoprobs_core::models::GeneRole;

use super::cli::TEMPLATES_DIR;
use crate::settings::{build_config, spinner};

pub fn run_locate(matches: &ArgMatches) -> Result<()> {
    let config = build_config(matches)?;
    let pool = WorkerPool::from_config(&config)?;
    let separator = config.separator()?;
    let out_name = config.out_name();

    // every gene role is checked before anything is aligned
    let mut references = Vec::new();
    for occurrence in matches
        .get_occurrences::<String>("ref")
        .context("At least one --ref <GENE> <FASTA> is required.")?
    {
        let values: Vec<&String> = occurrence.collect();
        let [gene, fasta] = values.as_slice() else {
            anyhow::bail!("--ref needs a gene role and a FASTA file, got: {:?}", values);
        };
        references.push((GeneRole::from_str(gene)?, PathBuf::from(fasta.as_str())));
    }

    let motifs: Vec<String> = matches
        .get_many::<String>("motif")
        .map(|values| values.map(|m| m.to_uppercase()).collect())
        .unwrap_or_default();
    let motifs: Vec<&str> = motifs.iter().map(String::as_str).collect();

    let muscle = matches
        .get_one::<String>("muscle")
        .map(MuscleAligner::new)
        .unwrap_or_default();
    let pre_aligned = matches.get_flag("aligned");

    for (role, fasta) in references {
        let pb = spinner(format!("Locating CDR3 anchors for {} genes", role))?;

        let aligned = if pre_aligned {
            FastaAlignment.align(&fasta)
        } else {
            let prepared = preprocess_reference(&fasta, &config.working_dir().join(TEMPLATES_DIR))
                .with_context(|| format!("Failed to prepare reference file '{}'", fasta.display()))?;
            muscle.align(&prepared)
        };
        let alignment = aligned.with_context(|| format!("Failed to align '{}'", fasta.display()))?;

        let locator = AnchorLocator::with_role(alignment, role);
        let anchors = locator.locate_with_pool(&motifs, &pool)?.dedup_by_gene();
        let path = anchors.write_to_dir(config.working_dir(), role, &out_name, separator)?;

        pb.finish_and_clear();
        info!(
            "Wrote {} {} gene anchors to '{}'",
            anchors.len(),
            role,
            path.display()
        );
    }

    Ok(())
}
