//! File I/O utilities with atomic writes
//!
//! Plans are rewritten as a whole on every change, so writes go to a temp
//! file next to the target and are renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::DayplanError;

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> DayplanError {
    DayplanError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, DayplanError> {
    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, DayplanError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from a file, returning an error if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, DayplanError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(DayplanError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write JSON to a file atomically (write to temp, sync, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), DayplanError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer
        .flush()
        .map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Snapshot {
        month: String,
        days: Vec<i64>,
    }

    fn sample() -> Snapshot {
        Snapshot {
            month: "2025-01".to_string(),
            days: vec![1500, 0, 2250],
        }
    }

    #[test]
    fn test_read_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Snapshot = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Snapshot::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.json");

        write_json_atomic(&path, &sample()).unwrap();

        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
        assert!(!temp_dir.path().join("plans.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("plans.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_required_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_json_required::<Snapshot, _>(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(DayplanError::Storage(_))));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Snapshot, _> = read_json(&path);
        assert!(matches!(result, Err(DayplanError::Storage(_))));
    }
}
