//! Export module for DayPlan
//!
//! Exports one month's plan record:
//! - CSV: one row per day and category (spreadsheet-compatible)
//! - JSON: machine-readable, with schema version and metadata
//! - YAML: human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_plan_csv;
pub use json::{export_plan_json, ExportMetadata, PlanExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_plan_yaml;
