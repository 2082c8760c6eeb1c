//! Calendar month representation
//!
//! A plan always covers exactly one calendar month; this type owns the
//! date arithmetic for it.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BudgetMonth {
    year: i32,
    month: u32,
}

impl BudgetMonth {
    /// Create a month, rejecting month numbers outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodParseError::InvalidFormat(format!(
                "{:04}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Number of days in the month (28-31)
    pub fn day_count(&self) -> usize {
        self.last_day().day() as usize
    }

    /// Every date of the month in calendar order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.day_count())
            .collect()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a month from "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    /// Human-friendly name (e.g., "January 2025")
    pub fn friendly_name(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Whether a date falls on a Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BudgetMonth {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
