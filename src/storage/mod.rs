//! Storage layer for DayPlan
//!
//! Provides JSON file storage with atomic writes, a locked plan repository
//! and the append-only audit log.

pub mod file_io;
pub mod init;
pub mod plans;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use plans::{PlanKey, PlanRepository};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::DayplanPaths;
use crate::error::DayplanError;

/// Main storage coordinator
pub struct Storage {
    paths: DayplanPaths,
    pub plans: PlanRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: DayplanPaths) -> Result<Self, DayplanError> {
        paths.ensure_directories()?;

        Ok(Self {
            plans: PlanRepository::new(paths.plans_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &DayplanPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), DayplanError> {
        self.plans.load()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), DayplanError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), DayplanError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }
}
