//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Input file given on the command line for one year/day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitInput {
    pub year: u16,
    pub day: u8,
    pub path: PathBuf,
}

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
    /// Input directory path
    pub input_dir: PathBuf,
    /// Input file overriding the directory lookup
    pub explicit_input: Option<ExplicitInput>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_dir = expand_tilde(&args.input_dir);

        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        let explicit_input = match (args.input, args.year, args.day) {
            (None, _, _) => None,
            (Some(path), Some(year), Some(day)) => {
                let path = expand_tilde(&path);
                if !path.is_file() {
                    return Err(CliError::Config(format!(
                        "Input file {} does not exist",
                        path.display()
                    )));
                }
                Some(ExplicitInput { year, day, path })
            }
            (Some(_), _, _) => {
                return Err(CliError::Config(
                    "--input requires both --year and --day".to_string(),
                ));
            }
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            explicit_input,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
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
    use tempfile::NamedTempFile;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["puzzle", "--input-dir", "/tmp/puzzle-inputs"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~")), home);
            assert_eq!(expand_tilde(Path::new("~/inputs")), home.join("inputs"));
        }
        assert_eq!(
            expand_tilde(Path::new("/abs/~/inputs")),
            PathBuf::from("/abs/~/inputs")
        );
        assert_eq!(expand_tilde(Path::new("~user")), PathBuf::from("~user"));
    }

    #[test]
    fn test_defaults_resolve() {
        let config = Config::from_args(args(&[])).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/tmp/puzzle-inputs"));
        assert!(config.thread_count >= 1);
        assert!(config.explicit_input.is_none());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = Config::from_args(args(&["--threads", "0"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_explicit_input_must_exist() {
        let err = Config::from_args(args(&[
            "--input",
            "/definitely/not/here.txt",
            "-y",
            "2025",
            "-d",
            "12",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_explicit_input_resolves() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let config = Config::from_args(args(&["--input", path, "-y", "2025", "-d", "12"])).unwrap();
        assert_eq!(
            config.explicit_input,
            Some(ExplicitInput {
                year: 2025,
                day: 12,
                path: file.path().to_path_buf(),
            })
        );
    }
}
