//! Budget redistributor
//!
//! Greedy matching of over-spent days against under-spent days. The largest
//! overage is covered first, from the largest shortfall first; ties break by
//! earlier date. Each step moves spend from the source day to the
//! destination day and is recorded as a `Transfer`. Spend is only ever
//! moved, so the month total is conserved.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{DayplanError, DayplanResult};
use crate::models::{DayBalance, DayBalanceInput, Money, Transfer};

/// Result of one redistribution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redistribution {
    /// Balances after all transfers
    pub balances: BTreeMap<NaiveDate, DayBalance>,
    /// Transfers in the order they were made
    pub transfers: Vec<Transfer>,
    /// Overage that no under-spent day could absorb
    pub unresolved: BTreeMap<NaiveDate, Money>,
}

impl Redistribution {
    pub fn total_moved(&self) -> Money {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    pub fn total_unresolved(&self) -> Money {
        self.unresolved.values().sum()
    }
}

/// Validate caller-supplied figures
///
/// Every day needs both `spent` and `limit`, and neither may be negative.
/// Nothing is transferred unless the whole input is valid.
pub fn validate_inputs(
    days: &BTreeMap<NaiveDate, DayBalanceInput>,
) -> DayplanResult<BTreeMap<NaiveDate, DayBalance>> {
    days.iter()
        .map(|(date, input)| {
            let spent = input.spent.ok_or_else(|| {
                DayplanError::Validation(format!("{}: missing spent", date))
            })?;
            let limit = input.limit.ok_or_else(|| {
                DayplanError::Validation(format!("{}: missing limit", date))
            })?;
            if spent.is_negative() {
                return Err(DayplanError::Validation(format!(
                    "{}: spent cannot be negative ({})",
                    date, spent
                )));
            }
            if limit.is_negative() {
                return Err(DayplanError::Validation(format!(
                    "{}: limit cannot be negative ({})",
                    date, limit
                )));
            }
            Ok((*date, DayBalance::new(spent, limit)))
        })
        .collect()
}

/// Validate then redistribute
pub fn redistribute(days: &BTreeMap<NaiveDate, DayBalanceInput>) -> DayplanResult<Redistribution> {
    let balances = validate_inputs(days)?;
    Ok(redistribute_balances(balances))
}

/// Run the greedy pass over already-validated balances
pub fn redistribute_balances(mut balances: BTreeMap<NaiveDate, DayBalance>) -> Redistribution {
    let over_days = ranked(&balances, DayBalance::overage);
    let under_days = ranked(&balances, DayBalance::shortfall);

    let mut transfers = Vec::new();
    let mut unresolved = BTreeMap::new();
    let mut next_under = 0;

    for source in over_days {
        let mut remaining = balances[&source].overage();

        while remaining.is_positive() && next_under < under_days.len() {
            let destination = under_days[next_under];
            // Recomputed every step: earlier transfers may have filled this day
            let shortfall = balances[&destination].shortfall();
            if !shortfall.is_positive() {
                next_under += 1;
                continue;
            }

            let amount = remaining.min(shortfall);
            if let Some(day) = balances.get_mut(&source) {
                day.spent -= amount;
            }
            if let Some(day) = balances.get_mut(&destination) {
                day.spent += amount;
            }
            remaining -= amount;

            transfers.push(Transfer {
                source_day: source,
                destination_day: destination,
                amount,
            });

            if amount == shortfall {
                next_under += 1;
            }
        }

        if remaining.is_positive() {
            unresolved.insert(source, remaining);
        }
    }

    if !unresolved.is_empty() {
        tracing::warn!(
            days = unresolved.len(),
            overage = %unresolved.values().sum::<Money>(),
            "overage left unresolved, no shortfall remaining"
        );
    }

    Redistribution {
        balances,
        transfers,
        unresolved,
    }
}

/// Dates with a positive metric, largest first, earlier date on ties
fn ranked(
    balances: &BTreeMap<NaiveDate, DayBalance>,
    metric: fn(&DayBalance) -> Money,
) -> Vec<NaiveDate> {
    let mut days: Vec<(NaiveDate, Money)> = balances
        .iter()
        .map(|(date, balance)| (*date, metric(balance)))
        .filter(|(_, value)| value.is_positive())
        .collect();
    days.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    days.into_iter().map(|(date, _)| date).collect()
}
