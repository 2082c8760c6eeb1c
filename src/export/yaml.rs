//! YAML Export functionality
//!
//! Human-readable plan export with a short header comment.

use std::io::Write;

use crate::error::{DayplanError, DayplanResult};
use crate::export::json::PlanExport;
use crate::models::PlanRecord;

fn export_err(e: impl std::fmt::Display) -> DayplanError {
    DayplanError::Export(e.to_string())
}

/// Export a plan to YAML
pub fn export_plan_yaml<W: Write>(record: &PlanRecord, writer: &mut W) -> DayplanResult<()> {
    let export = PlanExport::new(record);

    writeln!(writer, "# DayPlan export: {}", record.month.friendly_name()).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}
