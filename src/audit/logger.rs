//! Append-only audit logger
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{DayplanError, DayplanResult};

use super::entry::AuditEntry;

fn open_err(e: std::io::Error) -> DayplanError {
    DayplanError::Io(format!("Failed to open audit log: {}", e))
}

/// Writes audit entries to a JSONL file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_append(&self) -> DayplanResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(open_err)
    }

    fn write_entry(file: &mut File, entry: &AuditEntry) -> DayplanResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| DayplanError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        writeln!(file, "{}", json)
            .map_err(|e| DayplanError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> DayplanResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    ///
    /// A redistribution run logs all of its transfers this way.
    pub fn log_batch(&self, entries: &[AuditEntry]) -> DayplanResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_append()?;
        for entry in entries {
            Self::write_entry(&mut file, entry)?;
        }

        file.flush()
            .map_err(|e| DayplanError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> DayplanResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path).map_err(open_err)?;
        let mut entries = Vec::new();

        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                DayplanError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                DayplanError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries
    pub fn read_recent(&self, count: usize) -> DayplanResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn entry_count(&self) -> DayplanResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn transfer_entry(source: &str) -> AuditEntry {
        AuditEntry::create(
            EntityType::Transfer,
            source,
            None,
            &json!({"source_day": source, "amount": 1500}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&transfer_entry("2025-01-01")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Transfer);
    }

    #[test]
    fn test_log_batch_preserves_order() {
        let (logger, _temp) = create_test_logger();
        let entries: Vec<_> = ["2025-01-01", "2025-01-02", "2025-01-03"]
            .into_iter()
            .map(transfer_entry)
            .collect();

        logger.log_batch(&entries).unwrap();

        let read = logger.read_all().unwrap();
        let ids: Vec<_> = read.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["2025-01-01", "2025-01-02", "2025-01-03"]);
    }

    #[test]
    fn test_empty_batch_creates_nothing() {
        let (logger, _temp) = create_test_logger();
        logger.log_batch(&[]).unwrap();
        assert!(!logger.path().exists());
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for day in 1..=9 {
            logger.log(&transfer_entry(&format!("2025-01-0{}", day))).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "2025-01-08");
        assert_eq!(recent[1].entity_id, "2025-01-09");
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert_eq!(logger.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&transfer_entry("2025-01-01")).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.entry_count().unwrap(), 1);
    }
}
