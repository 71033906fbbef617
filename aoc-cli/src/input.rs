//! Puzzle inputs stored on disk

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of puzzle inputs laid out as `{dir}/{year}_day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the input for a specific year/day
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Check if the input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the stored input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        read_input(&self.path(year, day))
    }
}

/// Read a puzzle input file, distinguishing a missing file from other failures
pub fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::Missing(path.to_path_buf()),
        _ => InputError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("/inputs"));
        assert_eq!(store.path(2023, 1), PathBuf::from("/inputs/2023_day01.txt"));
        assert_eq!(store.path(2023, 25), PathBuf::from("/inputs/2023_day25.txt"));
    }

    #[test]
    fn test_read_stored_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 4));
        assert!(matches!(store.read(2023, 4), Err(InputError::Missing(_))));

        let input = "Card 1: 1 | 1\n";
        fs::write(store.path(2023, 4), input).unwrap();
        assert!(store.contains(2023, 4));
        assert_eq!(store.read(2023, 4).unwrap(), input);
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir(store.path(2023, 9)).unwrap();
        assert!(!store.contains(2023, 9));
        assert!(matches!(store.read(2023, 9), Err(InputError::Read { .. })));
    }
}
