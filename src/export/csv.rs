//! CSV Export functionality
//!
//! One row per (day, category) with planned and actual amounts, for
//! spreadsheets.

use std::collections::BTreeSet;
use std::io::Write;

use crate::error::{DayplanError, DayplanResult};
use crate::models::PlanRecord;

fn export_err(e: impl std::fmt::Display) -> DayplanError {
    DayplanError::Export(e.to_string())
}

/// Export a plan's calendar to CSV
pub fn export_plan_csv<W: Write>(record: &PlanRecord, writer: &mut W) -> DayplanResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Date", "Day Type", "Category", "Planned", "Actual", "Day Status"])
        .map_err(export_err)?;

    for day in &record.days {
        let categories: BTreeSet<&String> = day
            .planned_budget
            .keys()
            .chain(day.actual_spending.keys())
            .collect();

        let day_type = if day.is_weekend() { "weekend" } else { "weekday" };

        for category in categories {
            csv.write_record([
                day.date.to_string(),
                day_type.to_string(),
                category.clone(),
                format!("{:.2}", day.planned_for(category).as_decimal()),
                format!("{:.2}", day.spent_for(category).as_decimal()),
                day.status.to_string(),
            ])
            .map_err(export_err)?;
        }
    }

    csv.flush().map_err(export_err)
}
