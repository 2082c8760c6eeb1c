//! CLI command for plan export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{DayplanError, DayplanResult};
use crate::export::{export_plan_csv, export_plan_json, export_plan_yaml};
use crate::models::PlanRecord;
use crate::storage::Storage;

use super::parse_month;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per day and category
    Csv,
    /// Full plan record
    Json,
    /// Full plan record, human-readable
    Yaml,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Month to export (YYYY-MM, default: current)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn write_export<W: Write>(record: &PlanRecord, args: &ExportArgs, writer: &mut W) -> DayplanResult<()> {
    match args.format {
        ExportFormat::Csv => export_plan_csv(record, writer)?,
        ExportFormat::Json => export_plan_json(record, writer, args.pretty)?,
        ExportFormat::Yaml => export_plan_yaml(record, writer)?,
    }
    writer
        .flush()
        .map_err(|e| DayplanError::Export(format!("Failed to flush export: {}", e)))
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, settings: &Settings, args: ExportArgs) -> DayplanResult<()> {
    let month = parse_month(args.month.as_deref())?;
    let record = storage.plans.require(settings.user_id, month)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                DayplanError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write_export(&record, &args, &mut BufWriter::new(file))?;
            eprintln!("Exported {} to {}", month, path.display());
        }
        None => {
            let stdout = io::stdout();
            write_export(&record, &args, &mut stdout.lock())?;
        }
    }

    Ok(())
}
