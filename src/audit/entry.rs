//! Audit entry data structures
//!
//! Defines the structure of audit log entries: what happened, to which
//! plan element, and the JSON state around the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A generated monthly plan
    Plan,
    /// Spending recorded against a day
    CalendarDay,
    /// One redistribution step
    Transfer,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Plan => write!(f, "Plan"),
            EntityType::CalendarDay => write!(f, "CalendarDay"),
            EntityType::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Key of the affected entity (e.g., "usr-1a2b3c4d:2025-01" or a date)
    pub entity_id: String,

    /// Human-readable label (e.g., the category a spend was recorded against)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an update operation
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
