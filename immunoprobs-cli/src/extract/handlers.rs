use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use immunoprobs_core::WorkerPool;
use immunoprobs_core::io::DelimitedTable;
use immunoprobs_core::models::{GermlineGenes, RepertoireRecord};
use immunoprobs_extract::{SequenceExtractor, sample_rows};

use crate::settings::{build_config, spinner};

fn read_reference(path: &str) -> Result<GermlineGenes> {
    GermlineGenes::from_fasta(Path::new(path))
        .with_context(|| format!("Failed to read reference genes from '{}'", path))
}

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let mut config = build_config(matches)?;
    if let Some(&offset) = matches.get_one::<usize>("trim-offset") {
        config.extract.trim_offset = offset;
    }
    if let Some(allele) = matches.get_one::<String>("default-allele") {
        config.extract.default_allele = allele.clone();
    }
    if matches.get_flag("ignore-allele") {
        config.extract.use_allele = false;
    }
    let pool = WorkerPool::from_config(&config)?;
    let separator = config.separator()?;

    let seqs = matches
        .get_one::<String>("seqs")
        .expect("A path to a sequence table is required.");
    let ref_v = matches
        .get_one::<String>("ref-v")
        .expect("A V gene reference file is required.");
    let ref_j = matches
        .get_one::<String>("ref-j")
        .expect("A J gene reference file is required.");

    let pb = spinner("Reading reference genes and sequences".to_string())?;
    let v_genes = read_reference(ref_v)?;
    let j_genes = read_reference(ref_j)?;

    let table = DelimitedTable::read(seqs, separator)
        .with_context(|| format!("Failed to read sequences from '{}'", seqs))?;
    let mut records = RepertoireRecord::from_table(&table, &config.columns)?;
    if let Some(&n) = matches.get_one::<usize>("n-random") {
        records = sample_rows(&records, n)?;
    }

    pb.set_message(format!("Extracting {} sequences", records.len()));
    let extractor = SequenceExtractor::new(v_genes.into(), j_genes.into(), config.extract.clone());
    let result = extractor.extract(&records, &pool)?;

    pb.set_message("Writing output tables");
    let files = result.write_to_dir(
        config.working_dir(),
        &config.out_name(),
        separator,
        &config.columns,
    )?;
    pb.finish_and_clear();

    info!("{}", result.summary);
    info!(
        "Written '{}', '{}', '{}' and '{}'",
        files.cdr3.display(),
        files.productive.display(),
        files.unproductive.display(),
        files.all.display()
    );

    Ok(())
}
