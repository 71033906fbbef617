//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory of stored puzzle inputs
    pub input_dir: PathBuf,
    /// Explicit input file for a single selected day
    pub input_file: Option<PathBuf>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
    pub verbose: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        if args.input.is_some() && args.day.is_none() {
            return Err(CliError::Config(
                "an input file can only be given together with --day".to_string(),
            ));
        }
        if args.threads == Some(0) {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            input_file: args.input.as_deref().map(expand_tilde),
            thread_count: args.threads.unwrap_or_else(num_cpus),
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str]) -> Result<Config, CliError> {
        let args = Args::try_parse_from(std::iter::once("aoc").chain(argv.iter().copied())).unwrap();
        Config::from_args(args)
    }

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(expand_tilde(Path::new("~/inputs/a")), home.join("inputs/a"));
        assert_eq!(expand_tilde(Path::new("/tmp/~x")), PathBuf::from("/tmp/~x"));
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_defaults_resolve() {
        let config = config(&[]).unwrap();
        assert!(config.thread_count >= 1);
        assert!(config.input_dir.ends_with(".cache/aoc_solver/inputs"));
        assert_eq!(config.input_file, None);
        assert!(!config.verbose);
    }

    #[test]
    fn test_verbose_carried_into_config() {
        assert!(config(&["--verbose"]).unwrap().verbose);
    }

    #[test]
    fn test_input_file_requires_day() {
        assert!(matches!(config(&["in.txt"]), Err(CliError::Config(_))));
        let config = config(&["in.txt", "-d", "3"]).unwrap();
        assert_eq!(config.input_file, Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(config(&["--threads", "0"]), Err(CliError::Config(_))));
        assert_eq!(config(&["--threads", "3"]).unwrap().thread_count, 3);
    }
}
