//! Plan summary display
//!
//! Month-level figures, category amounts and redistribution transfers.

use crate::models::{Money, PlanRecord, Transfer};
use crate::services::RedistributionOutcome;

/// Format the month-level summary of a plan
pub fn format_plan_summary(record: &PlanRecord, symbol: &str) -> String {
    let plan = &record.plan;
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!(
        "Plan for {} ({}, {} income)\n",
        record.month.friendly_name(),
        record.region,
        record.tier
    ));
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!("  {:<16} {:>14}\n", "Income:", money(plan.total_income)));
    output.push_str(&format!("  {:<16} {:>14}\n", "Fixed:", money(plan.fixed_total)));
    output.push_str(&format!("  {:<16} {:>14}\n", "Savings goal:", money(plan.savings_goal)));
    output.push_str(&format!(
        "  {:<16} {:>14}\n",
        "Discretionary:",
        money(plan.discretionary_total)
    ));

    if plan.category_amounts.is_empty() {
        return output;
    }

    let name_width = plan
        .category_amounts
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    output.push('\n');
    output.push_str(&format!(
        "  {:<name_width$}  {:>12}  {:>12}\n",
        "Category",
        "Monthly",
        "Spent",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "  {:-<name_width$}  {:->12}  {:->12}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (name, amount) in &plan.category_amounts {
        let spent: Money = record.days.iter().map(|d| d.spent_for(name)).sum();
        output.push_str(&format!(
            "  {:<name_width$}  {:>12}  {:>12}\n",
            name,
            money(*amount),
            money(spent),
            name_width = name_width,
        ));
    }

    output.push_str(&format!(
        "\n  Planned on calendar: {}   Spent so far: {}\n",
        money(record.total_planned()),
        money(record.total_spent())
    ));

    output
}

/// Format a transfer history
pub fn format_transfers(transfers: &[Transfer], symbol: &str) -> String {
    if transfers.is_empty() {
        return "No transfers.".to_string();
    }

    let mut output = String::new();
    for transfer in transfers {
        output.push_str(&format!(
            "  {} -> {}: {}\n",
            transfer.source_day,
            transfer.destination_day,
            transfer.amount.format_with_symbol(symbol)
        ));
    }
    let total: Money = transfers.iter().map(|t| t.amount).sum();
    output.push_str(&format!("  Total moved: {}\n", total.format_with_symbol(symbol)));
    output
}

/// Format the result of a rebalance
pub fn format_outcome(outcome: &RedistributionOutcome, symbol: &str) -> String {
    if outcome.transfers.is_empty() && outcome.unresolved.is_empty() {
        return "Every day is within its limit. Nothing to move.".to_string();
    }

    let mut output = String::new();
    if !outcome.transfers.is_empty() {
        output.push_str(&format!("{} transfer(s):\n", outcome.transfers.len()));
        output.push_str(&format_transfers(&outcome.transfers, symbol));
    }

    if !outcome.unresolved.is_empty() {
        output.push_str("Overage with nothing left to cover it:\n");
        for (date, amount) in &outcome.unresolved {
            output.push_str(&format!("  {}: {}\n", date, amount.format_with_symbol(symbol)));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_record;
    use std::collections::BTreeMap;

    #[test]
    fn test_plan_summary() {
        let summary = format_plan_summary(&sample_record(), "$");
        assert!(summary.contains("Plan for January 2025 (US, Middle income)"));
        assert!(summary.contains("$1500.00"));
        assert!(summary.contains("groceries"));
    }

    #[test]
    fn test_transfers() {
        let record = sample_record();
        let text = format_transfers(&record.transfers, "$");
        assert!(text.contains("2025-01-02 -> 2025-01-03: $12.50"));
        assert_eq!(format_transfers(&[], "$"), "No transfers.");
    }

    #[test]
    fn test_summary_uses_configured_symbol() {
        let record = sample_record();
        let summary = format_plan_summary(&record, "€");
        assert!(summary.contains("€1500.00"));
        assert!(!summary.contains('$'));

        let text = format_transfers(&record.transfers, "€");
        assert!(text.contains("2025-01-02 -> 2025-01-03: €12.50"));
    }

    #[test]
    fn test_unresolved_overage_listed() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 4).unwrap();
        let outcome = RedistributionOutcome {
            days: Vec::new(),
            transfers: Vec::new(),
            unresolved: BTreeMap::from([(date, Money::from_cents(750))]),
        };
        let text = format_outcome(&outcome, "£");
        assert!(text.contains("2025-01-04: £7.50"));
    }

    #[test]
    fn test_balanced_outcome() {
        let outcome = RedistributionOutcome {
            days: Vec::new(),
            transfers: Vec::new(),
            unresolved: BTreeMap::new(),
        };
        assert!(format_outcome(&outcome, "$").contains("Nothing to move"));
    }
}
