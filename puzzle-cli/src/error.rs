//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] puzzle_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// No input file for a selected year/day
    #[error("No input for {year}/day{day:02} at {}", .path.display())]
    InputMissing { year: u16, day: u8, path: PathBuf },

    /// Input file exists but could not be read
    #[error("Input read failed for {year}/day{day:02}: {source}")]
    InputRead {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one
    ///
    /// Nested `Multiple`s are flattened so the result is always one level deep,
    /// with `first`'s errors ahead of `second`'s.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input store errors
#[derive(Error, Debug)]
pub enum InputError {
    /// Reading an input file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(message: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(message.to_string()).into()
    }

    fn messages(err: &ArcExecutorError) -> Vec<String> {
        match err.inner() {
            ExecutorError::Multiple(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_singles() {
        let combined = ArcExecutorError::combine(single("a"), single("b"));
        assert_eq!(
            messages(&combined),
            [
                "Thread pool creation failed: a",
                "Thread pool creation failed: b"
            ]
        );
    }

    #[test]
    fn test_combine_flattens() {
        let left = ArcExecutorError::combine(single("a"), single("b"));
        let right = ArcExecutorError::combine(single("c"), single("d"));

        let both = ArcExecutorError::combine(left.clone(), right.clone());
        assert_eq!(messages(&both).len(), 4);
        assert_eq!(both.to_string(), "Multiple errors occurred (4 total)");

        let prepended = ArcExecutorError::combine(single("z"), right);
        assert_eq!(messages(&prepended)[0], "Thread pool creation failed: z");

        let appended = ArcExecutorError::combine(left, single("z"));
        assert_eq!(messages(&appended)[2], "Thread pool creation failed: z");
    }

    #[test]
    fn test_combine_opt() {
        let only = ArcExecutorError::combine_opt(None, single("a"));
        assert_eq!(messages(&only), ["Thread pool creation failed: a"]);

        let pair = ArcExecutorError::combine_opt(Some(only), single("b"));
        assert_eq!(messages(&pair).len(), 2);
    }

    #[test]
    fn test_input_missing_message() {
        let err = ExecutorError::InputMissing {
            year: 2025,
            day: 3,
            path: PathBuf::from("/inputs/2025/day03.txt"),
        };
        assert_eq!(
            err.to_string(),
            "No input for 2025/day03 at /inputs/2025/day03.txt"
        );
    }
}
