//! Spending categories and their temporal behavior
//!
//! Each category places its monthly amount on the calendar according to one
//! behavior. Habit frequencies arrive in mixed cadences and are normalized to
//! a monthly count before weighting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a category's monthly amount lands on calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryBehavior {
    /// The whole amount on one day
    Fixed,
    /// Evenly across weekdays (near-daily necessities)
    Spread,
    /// A handful of days, preferring weekends (occasional spending)
    Clustered,
}

impl fmt::Display for CategoryBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryBehavior::Fixed => f.pad("fixed"),
            CategoryBehavior::Spread => f.pad("spread"),
            CategoryBehavior::Clustered => f.pad("clustered"),
        }
    }
}

/// Anchor day for FIXED categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FixedDay {
    /// First of the month (rent, mortgage, school fees)
    MonthStart,
    /// Fifth of the month, or the last day of a shorter month
    #[default]
    Fifth,
}

impl FixedDay {
    /// Index into the month's ordered day list
    pub fn day_index(&self, day_count: usize) -> Option<usize> {
        if day_count == 0 {
            return None;
        }
        match self {
            FixedDay::MonthStart => Some(0),
            FixedDay::Fifth => Some(4.min(day_count - 1)),
        }
    }
}

/// A category entry in the behavior table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Category key (e.g., "coffee", "dining_out")
    pub name: String,

    /// Temporal placement rule
    pub behavior: CategoryBehavior,

    /// Anchor day, only meaningful for FIXED categories
    #[serde(default)]
    pub fixed_day: FixedDay,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, behavior: CategoryBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            fixed_day: FixedDay::default(),
        }
    }

    /// A FIXED category paid at the start of the month
    pub fn month_start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: CategoryBehavior::Fixed,
            fixed_day: FixedDay::MonthStart,
        }
    }

    pub fn is_discretionary(&self) -> bool {
        self.behavior != CategoryBehavior::Fixed
    }
}

/// The unit a habit frequency is reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Cadence {
    /// Convert a count in this cadence to a monthly count
    pub fn to_monthly(&self, count: f64) -> f64 {
        match self {
            Cadence::Weekly => count * 4.0,
            Cadence::Monthly => count,
            Cadence::Yearly => count / 12.0,
        }
    }
}

/// A reported spending habit (e.g., "coffee 3 times a week")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitFrequency {
    pub count: f64,
    #[serde(default)]
    pub cadence: Cadence,
}

impl HabitFrequency {
    pub fn weekly(count: f64) -> Self {
        Self {
            count,
            cadence: Cadence::Weekly,
        }
    }

    pub fn monthly(count: f64) -> Self {
        Self {
            count,
            cadence: Cadence::Monthly,
        }
    }

    pub fn yearly(count: f64) -> Self {
        Self {
            count,
            cadence: Cadence::Yearly,
        }
    }

    /// Occurrences per month; negative or non-finite counts read as zero
    pub fn monthly_count(&self) -> f64 {
        if !self.count.is_finite() || self.count <= 0.0 {
            return 0.0;
        }
        self.cadence.to_monthly(self.count)
    }

    /// Number of days the distributor should target, if any
    pub fn day_count(&self) -> Option<usize> {
        let days = self.monthly_count().round();
        if days >= 1.0 {
            Some(days as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_conversion() {
        assert_eq!(HabitFrequency::weekly(3.0).monthly_count(), 12.0);
        assert_eq!(HabitFrequency::monthly(8.0).monthly_count(), 8.0);
        assert_eq!(HabitFrequency::yearly(6.0).monthly_count(), 0.5);
    }

    #[test]
    fn test_invalid_counts_are_zero() {
        assert_eq!(HabitFrequency::weekly(-2.0).monthly_count(), 0.0);
        assert_eq!(HabitFrequency::monthly(f64::NAN).monthly_count(), 0.0);
    }

    #[test]
    fn test_day_count_rounds() {
        assert_eq!(HabitFrequency::weekly(2.0).day_count(), Some(8));
        assert_eq!(HabitFrequency::yearly(6.0).day_count(), Some(1));
        assert_eq!(HabitFrequency::yearly(5.0).day_count(), None);
    }

    #[test]
    fn test_fixed_day_index() {
        assert_eq!(FixedDay::MonthStart.day_index(30), Some(0));
        assert_eq!(FixedDay::Fifth.day_index(30), Some(4));
        assert_eq!(FixedDay::Fifth.day_index(3), Some(2));
        assert_eq!(FixedDay::Fifth.day_index(0), None);
    }

    #[test]
    fn test_cadence_defaults_to_monthly() {
        let habit: HabitFrequency = serde_json::from_str(r#"{"count": 4}"#).unwrap();
        assert_eq!(habit.cadence, Cadence::Monthly);
    }
}
