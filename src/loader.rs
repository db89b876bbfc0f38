//! Loads the input dataset, creating the sample file first if it is missing

use std::path::{Path, PathBuf};

use crate::dataframe::RawTable;
use crate::error::{Error, Result};
use crate::io;
use crate::sample::sample_table;

/// Table read from disk and whether the file had to be created
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub table: RawTable,
    pub path: PathBuf,
    /// The sample dataset was written because no file existed
    pub created: bool,
}

/// Read `path`, writing the sample dataset there first if it does not exist
///
/// The sample is written in the format implied by the extension and then read
/// back, so a freshly created file goes through the same parsing as an
/// existing one.
pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<LoadedData> {
    let path = path.as_ref();
    let created = !path.exists();

    if created {
        log::info!("{} not found, writing the sample dataset", path.display());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        io::write_table(path, &sample_table()?)?;
    }

    let table = io::read_table(path)?;
    log::info!(
        "Loaded {} rows and {} columns from {}",
        table.row_count(),
        table.headers().len(),
        path.display()
    );

    Ok(LoadedData {
        table,
        path: path.to_path_buf(),
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_csv_is_created_from_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("banks.csv");

        let loaded = load_or_create(&path).unwrap();
        assert!(loaded.created);
        assert!(path.exists());
        assert_eq!(loaded.table, sample_table().unwrap());

        let again = load_or_create(&path).unwrap();
        assert!(!again.created);
        assert_eq!(again.table.row_count(), 6);
    }

    #[test]
    fn test_uncreatable_directory_names_the_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("data").join("banks.csv");

        match load_or_create(&path) {
            Err(Error::IoError(msg)) => {
                assert!(msg.contains("cannot create"), "{}", msg);
                assert!(msg.contains("blocker"), "{}", msg);
            }
            other => panic!("expected an I/O error, got {:?}", other.map(|l| l.path)),
        }
    }
}
