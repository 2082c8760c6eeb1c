//! Spending commands: record spend and rebalance

use crate::config::{EngineConfig, Settings};
use crate::display::{format_day_details, format_outcome};
use crate::error::DayplanResult;
use crate::models::BudgetMonth;
use crate::services::PlanService;
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_month};

/// Record spending against a day of the plan containing it
pub fn handle_spend(
    storage: &Storage,
    config: &EngineConfig,
    settings: &Settings,
    date: &str,
    category: &str,
    amount: &str,
) -> DayplanResult<()> {
    let date = parse_date(date)?;
    let amount = parse_amount(amount)?;
    let service = PlanService::new(storage, config, settings);

    let day = service.record_spending(BudgetMonth::containing(date), date, category, amount)?;

    let symbol = settings.currency_symbol.as_str();
    println!(
        "Recorded {} of {} on {}",
        amount.format_with_symbol(symbol),
        category,
        date
    );
    print!("{}", format_day_details(&day, symbol));
    Ok(())
}

/// Move spend from over-limit days onto days with room left
pub fn handle_rebalance(
    storage: &Storage,
    config: &EngineConfig,
    settings: &Settings,
    month: Option<&str>,
) -> DayplanResult<()> {
    let month = parse_month(month)?;
    let service = PlanService::new(storage, config, settings);

    let outcome = service.rebalance(month)?;
    println!("Rebalanced {}", month.friendly_name());
    print!("{}", format_outcome(&outcome, &settings.currency_symbol));
    Ok(())
}
