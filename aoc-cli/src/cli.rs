//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Puzzle input file, used instead of the input directory (needs --day)
    pub input: Option<PathBuf>,

    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}_day{day:02}.txt` puzzle inputs
    #[arg(long, default_value = "~/.cache/aoc_solver/inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log solver progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.input, None);
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert_eq!(args.input_dir, PathBuf::from("~/.cache/aoc_solver/inputs"));
        assert!(args.tags.is_empty());
        assert!(!args.quiet && !args.verbose);
    }

    #[test]
    fn test_filters_and_input_file() {
        let args = Args::try_parse_from([
            "aoc", "input.txt", "-y", "2023", "-d", "7", "-p", "2", "-t", "grid,bfs", "-q",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("input.txt")));
        assert_eq!((args.year, args.day, args.part), (Some(2023), Some(7), Some(2)));
        assert_eq!(args.tags, vec!["grid", "bfs"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_out_of_range_day_and_part_rejected() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-d", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
    }

    #[test]
    fn test_parallelize_by_values() {
        let args = Args::try_parse_from(["aoc", "--parallelize-by", "part"]).unwrap();
        assert_eq!(args.parallelize_by, ParallelizeBy::Part);
        assert!(Args::try_parse_from(["aoc", "--parallelize-by", "week"]).is_err());
    }
}
