//! User settings for DayPlan
//!
//! Manages per-installation preferences: the owning user, default region,
//! status thresholds and how clustered days are picked.

use serde::{Deserialize, Serialize};

use super::paths::DayplanPaths;
use crate::error::DayplanError;
use crate::models::UserId;

/// How clustered categories choose their days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClusteredSelection {
    /// Seeded from (user, year, month, category): regenerating gives the same calendar
    #[default]
    Seeded,
    /// Fresh entropy on every generation
    Fresh,
}

/// User settings for DayPlan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Owner of the plans generated by this installation
    #[serde(default)]
    pub user_id: UserId,

    /// Region used when onboarding answers do not name one
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Percent of a day's limit at which it is flagged as a warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_percent: u8,

    #[serde(default)]
    pub clustered_selection: ClusteredSelection,

    /// Days a clustered category targets when the user gave no frequency
    #[serde(default = "default_clustered_days")]
    pub clustered_default_days: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_region() -> String {
    "US".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_warning_threshold() -> u8 {
    80
}

fn default_clustered_days() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            default_region: default_region(),
            currency_symbol: default_currency(),
            warning_threshold_percent: default_warning_threshold(),
            clustered_selection: ClusteredSelection::default(),
            clustered_default_days: default_clustered_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DayplanPaths) -> Result<Self, DayplanError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DayplanError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let parse_err =
                |e: serde_json::Error| DayplanError::Config(format!("Failed to parse settings file: {}", e));
            let raw: serde_json::Value = serde_json::from_str(&contents).map_err(parse_err)?;
            let has_user = raw.get("user_id").is_some();
            let settings: Settings = serde_json::from_value(raw).map_err(parse_err)?;

            settings.validate()?;

            // Plans are keyed by user id, so a generated one must be kept
            if !has_user {
                tracing::warn!(user = %settings.user_id, "settings file had no user id, assigned a new one");
                settings.save(paths)?;
            }
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DayplanPaths) -> Result<(), DayplanError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DayplanError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            DayplanError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<(), DayplanError> {
        if self.warning_threshold_percent == 0 || self.warning_threshold_percent > 100 {
            return Err(DayplanError::Config(format!(
                "warning_threshold_percent must be 1-100, got {}",
                self.warning_threshold_percent
            )));
        }
        if self.clustered_default_days == 0 {
            return Err(DayplanError::Config(
                "clustered_default_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
