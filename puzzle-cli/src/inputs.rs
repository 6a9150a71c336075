//! Local store of puzzle inputs

use crate::config::ExplicitInput;
use crate::error::InputError;
use std::fs;
use std::path::PathBuf;

/// File-based lookup for puzzle inputs
///
/// Directory structure: `{base_dir}/{year}/day{day:02}.txt`. An explicit
/// input file replaces the lookup for its own year/day only.
pub struct InputStore {
    base_dir: PathBuf,
    explicit: Option<ExplicitInput>,
}

impl InputStore {
    /// Create a store rooted at `base_dir`
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            explicit: None,
        }
    }

    /// Serve `explicit.path` for `explicit.year`/`explicit.day`
    pub fn with_explicit(mut self, explicit: Option<ExplicitInput>) -> Self {
        self.explicit = explicit;
        self
    }

    /// Get the file path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.explicit {
            Some(e) if e.year == year && e.day == day => e.path.clone(),
            _ => self
                .base_dir
                .join(year.to_string())
                .join(format!("day{:02}.txt", day)),
        }
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input, or None if there is no file for it
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        let path = self.input_path(year, day);
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| InputError::Read { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        let path = store.input_path(2025, 1);
        assert_eq!(path, temp.path().join("2025").join("day01.txt"));

        let path = store.input_path(2023, 25);
        assert!(path.ends_with("2023/day25.txt"));
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2025, 12));
        assert!(store.get(2025, 12).unwrap().is_none());
    }

    #[test]
    fn test_reads_existing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        let input = "0:\n#\n\n1x1: 1\n";
        fs::create_dir_all(temp.path().join("2025")).unwrap();
        fs::write(store.input_path(2025, 12), input).unwrap();

        assert!(store.contains(2025, 12));
        assert_eq!(store.get(2025, 12).unwrap().as_deref(), Some(input));
    }

    #[test]
    fn test_explicit_input_overrides_one_day() {
        let temp = TempDir::new().unwrap();
        let explicit_path = temp.path().join("custom.txt");
        fs::write(&explicit_path, "custom").unwrap();

        let store = InputStore::new(temp.path().join("inputs")).with_explicit(Some(ExplicitInput {
            year: 2025,
            day: 12,
            path: explicit_path.clone(),
        }));

        assert_eq!(store.input_path(2025, 12), explicit_path);
        assert_eq!(store.get(2025, 12).unwrap().as_deref(), Some("custom"));
        assert!(!store.contains(2025, 11));
    }

    #[test]
    fn test_directory_in_place_of_file_is_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir_all(store.input_path(2025, 12)).unwrap();

        assert!(!store.contains(2025, 12));
        assert!(store.get(2025, 12).unwrap().is_none());
    }
}
