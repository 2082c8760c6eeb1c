//! Redistribution records
//!
//! A `DayBalance` is the (spent, limit) view of one day that the redistributor
//! works on. A `Transfer` is the audit record of one step.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Spent-vs-limit figures for one day, as supplied by a caller
///
/// Fields are optional so that incomplete input can be rejected with a clear
/// message instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayBalanceInput {
    #[serde(default)]
    pub spent: Option<Money>,
    #[serde(default)]
    pub limit: Option<Money>,
}

/// Validated spent-vs-limit figures for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBalance {
    pub spent: Money,
    pub limit: Money,
}

impl DayBalance {
    pub fn new(spent: Money, limit: Money) -> Self {
        Self { spent, limit }
    }

    /// Amount spent beyond the limit
    pub fn overage(&self) -> Money {
        (self.spent - self.limit).non_negative()
    }

    /// Amount of the limit left unspent
    pub fn shortfall(&self) -> Money {
        (self.limit - self.spent).non_negative()
    }
}

impl From<DayBalance> for DayBalanceInput {
    fn from(balance: DayBalance) -> Self {
        Self {
            spent: Some(balance.spent),
            limit: Some(balance.limit),
        }
    }
}

/// One redistribution step: spend moved from an over day to an under day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub source_day: NaiveDate,
    pub destination_day: NaiveDate,
    pub amount: Money,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.source_day, self.destination_day, self.amount
        )
    }
}
