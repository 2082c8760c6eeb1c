//! Display formatting for terminal output
//!
//! Formats plans, calendars and redistribution results as plain strings so
//! the CLI only has to print them.

pub mod calendar;
pub mod plan;

pub use calendar::{format_calendar, format_day_details};
pub use plan::{format_outcome, format_plan_summary, format_transfers};
