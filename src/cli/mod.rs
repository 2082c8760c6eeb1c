//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod plan;
pub mod setup;
pub mod spending;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use plan::{handle_plan_command, PlanCommands};
pub use setup::{handle_classify, handle_config, handle_init};
pub use spending::{handle_rebalance, handle_spend};

use chrono::NaiveDate;

use crate::error::{DayplanError, DayplanResult};
use crate::models::{BudgetMonth, Money};

/// Parse an optional "YYYY-MM" argument, defaulting to the current month
pub fn parse_month(month: Option<&str>) -> DayplanResult<BudgetMonth> {
    match month {
        Some(s) => BudgetMonth::parse(s).map_err(|e| DayplanError::Validation(e.to_string())),
        None => Ok(BudgetMonth::current()),
    }
}

/// Parse a "YYYY-MM-DD" argument
pub fn parse_date(date: &str) -> DayplanResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| DayplanError::Validation(format!("Invalid date (expected YYYY-MM-DD): {}", date)))
}

/// Parse an amount such as "12.50" or "$1,200"
pub fn parse_amount(amount: &str) -> DayplanResult<Money> {
    Money::parse(amount).map_err(|e| DayplanError::Validation(e.to_string()))
}
