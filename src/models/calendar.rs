//! Calendar day model
//!
//! One record per day of a planned month. The distributor fills
//! `planned_budget`; spending is recorded into `actual_spending`; the
//! redistributor moves spend between days through `redistributed`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::money::Money;
use super::period::is_weekend;

/// Weekday or weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(date: NaiveDate) -> Self {
        if is_weekend(date) {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }
}

/// How a day's spending compares to its plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    #[default]
    OnTrack,
    Warning,
    Over,
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayStatus::OnTrack => f.pad("on track"),
            DayStatus::Warning => f.pad("warning"),
            DayStatus::Over => f.pad("over"),
        }
    }
}

/// A single day of a monthly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,

    pub day_type: DayType,

    /// Planned amount per category
    #[serde(default)]
    pub planned_budget: BTreeMap<String, Money>,

    /// Recorded spending per category
    #[serde(default)]
    pub actual_spending: BTreeMap<String, Money>,

    /// Net spend moved onto (+) or off (-) this day by redistribution
    #[serde(default)]
    pub redistributed: Money,

    /// Sum of `planned_budget`
    #[serde(default)]
    pub total: Money,

    #[serde(default)]
    pub status: DayStatus,
}

impl CalendarDay {
    /// Create an empty day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_type: DayType::of(date),
            planned_budget: BTreeMap::new(),
            actual_spending: BTreeMap::new(),
            redistributed: Money::zero(),
            total: Money::zero(),
            status: DayStatus::OnTrack,
        }
    }

    /// Build the ordered day list for a set of dates
    pub fn for_dates(dates: &[NaiveDate]) -> Vec<CalendarDay> {
        dates.iter().copied().map(CalendarDay::new).collect()
    }

    pub fn is_weekend(&self) -> bool {
        self.day_type == DayType::Weekend
    }

    /// Add to a category's planned amount (never overwrites)
    pub fn add_planned(&mut self, category: &str, amount: Money) {
        *self
            .planned_budget
            .entry(category.to_string())
            .or_insert_with(Money::zero) += amount;
        self.total += amount;
    }

    /// Add to a category's recorded spending
    pub fn add_spending(&mut self, category: &str, amount: Money) {
        *self
            .actual_spending
            .entry(category.to_string())
            .or_insert_with(Money::zero) += amount;
    }

    pub fn planned_for(&self, category: &str) -> Money {
        self.planned_budget.get(category).copied().unwrap_or_default()
    }

    pub fn spent_for(&self, category: &str) -> Money {
        self.actual_spending.get(category).copied().unwrap_or_default()
    }

    /// Effective spend: recorded spending plus redistribution
    pub fn spent(&self) -> Money {
        self.actual_spending.values().sum::<Money>() + self.redistributed
    }

    /// The day's limit is its planned total
    pub fn limit(&self) -> Money {
        self.total
    }

    /// Recompute `status` against a warning threshold (percent of limit)
    pub fn refresh_status(&mut self, warning_threshold_percent: u8) {
        let spent = self.spent();
        let limit = self.limit();

        self.status = if spent > limit {
            DayStatus::Over
        } else if limit.is_positive()
            && spent.cents() * 100 >= limit.cents() * i64::from(warning_threshold_percent)
        {
            DayStatus::Warning
        } else {
            DayStatus::OnTrack
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> CalendarDay {
        CalendarDay::new(NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
    }

    #[test]
    fn test_day_type() {
        assert_eq!(day(4).day_type, DayType::Weekend);
        assert_eq!(day(6).day_type, DayType::Weekday);
    }

    #[test]
    fn test_add_planned_accumulates() {
        let mut d = day(6);
        d.add_planned("coffee", Money::from_cents(500));
        d.add_planned("coffee", Money::from_cents(250));
        d.add_planned("groceries", Money::from_cents(1000));

        assert_eq!(d.planned_for("coffee").cents(), 750);
        assert_eq!(d.total.cents(), 1750);
    }

    #[test]
    fn test_spent_includes_redistribution() {
        let mut d = day(6);
        d.add_spending("coffee", Money::from_cents(4500));
        d.redistributed = Money::from_cents(-1500);
        assert_eq!(d.spent().cents(), 3000);
    }

    #[test]
    fn test_status_thresholds() {
        let mut d = day(6);
        d.add_planned("coffee", Money::from_cents(1000));

        d.refresh_status(80);
        assert_eq!(d.status, DayStatus::OnTrack);

        d.add_spending("coffee", Money::from_cents(800));
        d.refresh_status(80);
        assert_eq!(d.status, DayStatus::Warning);

        d.add_spending("coffee", Money::from_cents(201));
        d.refresh_status(80);
        assert_eq!(d.status, DayStatus::Over);
    }

    #[test]
    fn test_status_with_empty_plan() {
        let mut d = day(6);
        d.refresh_status(80);
        assert_eq!(d.status, DayStatus::OnTrack);

        d.add_spending("coffee", Money::from_cents(1));
        d.refresh_status(80);
        assert_eq!(d.status, DayStatus::Over);
    }
}
