//! Test utilities for temporary file handling
//!
//! Provides temporary directories with automatic cleanup, respecting the
//! TMPDIR, TEMP and TMP environment variables, and helpers that write input
//! datasets in the bank schema.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static TEST_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Header row of the input dataset
pub const BANK_HEADERS: [&str; 10] = [
    "Bank",
    "Year",
    "Revenue",
    "Net_Income",
    "Assets",
    "Equity",
    "Deposits",
    "Loans",
    "SharePrice",
    "Dividends",
];

/// Get the temporary directory, respecting environment variables
///
/// Checks in order: TMPDIR, TEMP, TMP, then falls back to std::env::temp_dir()
pub fn get_temp_dir() -> PathBuf {
    env::var("TMPDIR")
        .or_else(|_| env::var("TEMP"))
        .or_else(|_| env::var("TMP"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

/// Generate a unique test directory path
pub fn test_temp_dir(test_name: &str) -> PathBuf {
    let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dirname = format!(
        "dubai_bank_test_{}_{}_{}",
        test_name,
        std::process::id(),
        counter
    );
    get_temp_dir().join(dirname)
}

/// RAII wrapper for temporary test directories with automatic cleanup
///
/// The directory and its contents are deleted when this struct is dropped
pub struct TempTestDir {
    path: PathBuf,
    keep: bool,
}

impl TempTestDir {
    pub fn new(test_name: &str) -> std::io::Result<Self> {
        let path = test_temp_dir(test_name);
        fs::create_dir_all(&path)?;
        Ok(TempTestDir { path, keep: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the directory
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Keep the directory after drop (for debugging)
    pub fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if !self.keep && self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

/// Write a CSV file with the given header and rows
pub fn write_csv(path: &Path, headers: &[&str], rows: &[&[&str]]) {
    let mut file = fs::File::create(path).expect("Failed to create test CSV");
    writeln!(file, "{}", headers.join(",")).expect("Failed to write headers");
    for row in rows {
        writeln!(file, "{}", row.join(",")).expect("Failed to write row");
    }
}

/// Write a bank dataset CSV with the standard header
pub fn write_bank_csv(path: &Path, rows: &[&[&str]]) {
    write_csv(path, &BANK_HEADERS, rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_unique() {
        assert_ne!(test_temp_dir("same"), test_temp_dir("same"));
    }

    #[test]
    fn test_temp_dir_cleanup() {
        let path;
        {
            let dir = TempTestDir::new("cleanup").unwrap();
            path = dir.path().to_path_buf();
            write_bank_csv(&dir.join("banks.csv"), &[]);
            assert!(dir.join("banks.csv").exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_write_bank_csv() {
        let dir = TempTestDir::new("write_csv").unwrap();
        let path = dir.join("banks.csv");
        write_bank_csv(
            &path,
            &[&["Mashreq", "2015", "6000", "1200", "30000", "5000", "20000", "15000", "8.7", "0.8"]],
        );

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Bank,Year,Revenue"));
        assert!(content.contains("Mashreq,2015,6000"));
    }
}
