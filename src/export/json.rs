//! JSON Export functionality
//!
//! Exports one month's plan, calendar and transfer history with schema
//! versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{DayplanError, DayplanResult};
use crate::models::{Money, PlanRecord};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported plan structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub record: PlanRecord,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub day_count: usize,
    pub category_count: usize,
    pub transfer_count: usize,
    pub total_planned: Money,
    pub total_spent: Money,
}

impl PlanExport {
    pub fn new(record: &PlanRecord) -> Self {
        let category_count = record
            .days
            .iter()
            .flat_map(|d| d.planned_budget.keys())
            .collect::<std::collections::BTreeSet<_>>()
            .len();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata: ExportMetadata {
                day_count: record.days.len(),
                category_count,
                transfer_count: record.transfers.len(),
                total_planned: record.total_planned(),
                total_spent: record.total_spent(),
            },
            record: record.clone(),
        }
    }
}

/// Export a plan to JSON
pub fn export_plan_json<W: Write>(
    record: &PlanRecord,
    writer: &mut W,
    pretty: bool,
) -> DayplanResult<()> {
    let export = PlanExport::new(record);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| DayplanError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| DayplanError::Export(e.to_string()))
}
