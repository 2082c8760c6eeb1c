//! Storage initialization
//!
//! Handles first-run setup: directories, user settings and an editable copy
//! of the built-in engine tables.

use crate::config::paths::DayplanPaths;
use crate::config::profiles::EngineConfig;
use crate::config::settings::Settings;
use crate::error::DayplanError;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &DayplanPaths) -> Result<Settings, DayplanError> {
    paths.ensure_directories()?;

    if !paths.profiles_file().exists() {
        EngineConfig::write_default(paths)?;
        tracing::debug!(path = %paths.profiles_file().display(), "wrote default profiles");
    }

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
        tracing::info!(user = %settings.user_id, "created settings");
    }

    Ok(settings)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &DayplanPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DayplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.profiles_file().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DayplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        let first = initialize_storage(&paths).unwrap();
        let second = initialize_storage(&paths).unwrap();
        assert_eq!(first.user_id, second.user_id);
    }
}
