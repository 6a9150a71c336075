//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
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

/// Puzzle solver runner
#[derive(Parser, Debug)]
#[command(name = "puzzle", about = "Run registered puzzle solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs as `{year}/day{DD}.txt`
    #[arg(long, env = "PUZZLE_INPUT_DIR", default_value = "~/.cache/puzzle_inputs")]
    pub input_dir: PathBuf,

    /// Read the input for the selected year and day from this file
    #[arg(long, requires_all = ["year", "day"])]
    pub input: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["puzzle"]).unwrap();
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert_eq!(args.verbose, 0);
        assert!(args.tags.is_empty());
        assert!(args.input.is_none());
    }

    #[test]
    fn test_filters_and_tags() {
        let args = Args::try_parse_from([
            "puzzle", "-y", "2025", "-d", "12", "-p", "1", "-t", "packing,backtracking", "-vv",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2025));
        assert_eq!(args.day, Some(12));
        assert_eq!(args.part, Some(1));
        assert_eq!(args.tags, vec!["packing", "backtracking"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_day_and_part_ranges() {
        assert!(Args::try_parse_from(["puzzle", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["puzzle", "-p", "3"]).is_err());
    }

    #[test]
    fn test_explicit_input_requires_year_and_day() {
        assert!(Args::try_parse_from(["puzzle", "--input", "in.txt"]).is_err());
        assert!(Args::try_parse_from(["puzzle", "--input", "in.txt", "-y", "2025"]).is_err());
        let args =
            Args::try_parse_from(["puzzle", "--input", "in.txt", "-y", "2025", "-d", "12"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
    }
}
