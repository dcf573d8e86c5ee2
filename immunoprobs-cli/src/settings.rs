use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use indicatif::{ProgressBar, ProgressStyle};

use immunoprobs_core::Config;

pub const CONFIG_ARG: &str = "config";
pub const THREADS_ARG: &str = "threads";
pub const SEPARATOR_ARG: &str = "separator";
pub const OUT_NAME_ARG: &str = "out-name";
pub const OUTPUT_DIR_ARG: &str = "output-dir";
pub const VERBOSE_ARG: &str = "verbose";

///
/// Options shared by every subcommand. They may be given before or after the
/// subcommand name.
///
pub fn global_args() -> Vec<Arg> {
    vec![
        Arg::new(CONFIG_ARG)
            .long(CONFIG_ARG)
            .value_name("TOML")
            .global(true)
            .help("Configuration file with [basic], [columns] and [extract] sections"),
        Arg::new(THREADS_ARG)
            .long(THREADS_ARG)
            .short('t')
            .value_name("N")
            .global(true)
            .help("Number of worker threads (default: all available cores)"),
        Arg::new(SEPARATOR_ARG)
            .long(SEPARATOR_ARG)
            .short('s')
            .value_name("CHAR")
            .global(true)
            .help("Field separator of input and output tables (default: tab)"),
        Arg::new(OUT_NAME_ARG)
            .long(OUT_NAME_ARG)
            .short('o')
            .value_name("NAME")
            .global(true)
            .help("Name or prefix for the output files"),
        Arg::new(OUTPUT_DIR_ARG)
            .long(OUTPUT_DIR_ARG)
            .short('w')
            .value_name("DIR")
            .global(true)
            .help("Existing directory to write output files to (default: current directory)"),
        Arg::new(VERBOSE_ARG)
            .long(VERBOSE_ARG)
            .short('v')
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Print debug messages"),
    ]
}

/// `RUST_LOG` wins over `--verbose`.
pub fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag(VERBOSE_ARG) {
        "debug"
    } else {
        "info"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

///
/// Defaults, then the `--config` file, then the individual flags. The result
/// is validated before it is returned.
///
pub fn build_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<String>(CONFIG_ARG) {
        Some(path) => Config::try_from(Path::new(path))
            .with_context(|| format!("Failed to load configuration from '{}'", path))?,
        None => Config::default(),
    };

    if let Some(threads) = matches.get_one::<String>(THREADS_ARG) {
        config.set_threads(threads)?;
    }
    if let Some(separator) = matches.get_one::<String>(SEPARATOR_ARG) {
        config.set_separator(separator)?;
    }
    if let Some(dir) = matches.get_one::<String>(OUTPUT_DIR_ARG) {
        config.set_working_dir(Path::new(dir))?;
    }
    if let Some(name) = matches.get_one::<String>(OUT_NAME_ARG) {
        config.set_out_name(name);
    }

    config.validate()?;
    Ok(config)
}

pub fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Command;
    use immunoprobs_core::errors::ConfigError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn matches(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .args(global_args())
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
    }

    #[rstest]
    fn test_flags_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let config = build_config(&matches(&[
            "--threads", "3", "--separator", ",", "--out-name", " run 1 ", "--output-dir", dir_arg,
        ]))
        .unwrap();

        assert_eq!(config.threads().unwrap().get(), 3);
        assert_eq!(config.separator().unwrap(), b',');
        assert_eq!(config.out_name(), "run1");
        assert_eq!(config.working_dir(), dir.path());
    }

    #[rstest]
    #[case("0")]
    #[case("two")]
    #[case("1.5")]
    fn test_invalid_threads_rejected(#[case] threads: &str) {
        let err = build_config(&matches(&["--threads", threads])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidThreadCount(_))
        ));
    }

    #[rstest]
    fn test_pipe_separator_rejected() {
        assert!(build_config(&matches(&["--separator", "|"])).is_err());
    }

    #[rstest]
    fn test_missing_output_dir_rejected() {
        let err = build_config(&matches(&["--output-dir", "/nonexistent/immunoprobs/out"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingDirectory(_))
        ));
    }

    #[rstest]
    fn test_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("immunoprobs.toml");
        std::fs::write(&path, "[basic]\nthreads = 2\n\n[extract]\ntrim_offset = 90\n").unwrap();

        let config = build_config(&matches(&["--config", path.to_str().unwrap(), "--threads", "5"])).unwrap();
        assert_eq!(config.threads().unwrap().get(), 5);
        assert_eq!(config.extract.trim_offset, 90);
    }
}
