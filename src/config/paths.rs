//! Path management for DayPlan
//!
//! ## Path Resolution Order
//!
//! 1. `DAYPLAN_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `dayplan`
//!    (`~/.config/dayplan` on Linux, `~/Library/Application Support/dayplan`
//!    on macOS, `%APPDATA%\dayplan` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::DayplanError;

/// Manages all paths used by DayPlan
#[derive(Debug, Clone)]
pub struct DayplanPaths {
    base_dir: PathBuf,
}

impl DayplanPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, DayplanError> {
        let base_dir = if let Ok(custom) = std::env::var("DAYPLAN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("dayplan"))
                .ok_or_else(|| {
                    DayplanError::Config("Could not determine a config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// User settings (<base>/config.json)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Region and category tables (<base>/profiles.json)
    pub fn profiles_file(&self) -> PathBuf {
        self.base_dir.join("profiles.json")
    }

    /// Audit log (<base>/audit.log)
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Generated plans (<base>/data/plans.json)
    pub fn plans_file(&self) -> PathBuf {
        self.data_dir().join("plans.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), DayplanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DayplanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DayplanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if DayPlan has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
