//! Calendar display
//!
//! One table row per day: planned total, effective spend, status and the
//! categories planned on that day.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{CalendarDay, DayStatus};

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    weekday: String,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Categories")]
    categories: String,
}

impl DayRow {
    fn new(day: &CalendarDay, symbol: &str) -> Self {
        let status = match day.status {
            DayStatus::OnTrack => day.status.to_string(),
            DayStatus::Warning => "! warning".to_string(),
            DayStatus::Over => "!! over".to_string(),
        };

        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            weekday: day.date.format("%a").to_string(),
            planned: day.total.format_with_symbol(symbol),
            spent: day.spent().format_with_symbol(symbol),
            status,
            categories: day
                .planned_budget
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Format a month's days as a table
pub fn format_calendar(days: &[CalendarDay], symbol: &str) -> String {
    if days.is_empty() {
        return "No days planned.".to_string();
    }

    let rows: Vec<DayRow> = days.iter().map(|day| DayRow::new(day, symbol)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format one day with its per-category breakdown
pub fn format_day_details(day: &CalendarDay, symbol: &str) -> String {
    let mut output = format!(
        "{} ({})  planned {}  spent {}  [{}]\n",
        day.date,
        day.date.format("%A"),
        day.total.format_with_symbol(symbol),
        day.spent().format_with_symbol(symbol),
        day.status
    );

    let categories: std::collections::BTreeSet<&String> = day
        .planned_budget
        .keys()
        .chain(day.actual_spending.keys())
        .collect();

    for category in categories {
        output.push_str(&format!(
            "  {:<16} {:>12} {:>12}\n",
            category,
            day.planned_for(category).format_with_symbol(symbol),
            day.spent_for(category).format_with_symbol(symbol)
        ));
    }

    if !day.redistributed.is_zero() {
        output.push_str(&format!(
            "  {:<16} {:>25}\n",
            "redistributed",
            day.redistributed.format_with_symbol(symbol)
        ));
    }

    output
}
