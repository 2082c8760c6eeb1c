//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64), which is the engine's
//! "currency precision". Weighted shares and even splits are computed here so
//! every stage rounds the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use dayplan::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Create a Money amount from a decimal figure, rounding to the nearest cent
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal figure (for display and export only)
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamp negative amounts to zero
    pub fn non_negative(self) -> Self {
        Self(self.0.max(0))
    }

    /// Apply a weight and round to whole cents (half away from zero)
    pub fn weighted(self, weight: f64) -> Self {
        Self((self.0 as f64 * weight).round() as i64)
    }

    /// Split into `parts` shares that sum exactly to `self`
    ///
    /// Every share gets the floored even portion; the last share carries the
    /// remainder. Returns an empty vector for zero parts.
    pub fn split_evenly(self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let n = parts as i64;
        let share = self.0.div_euclid(n);
        let remainder = self.0 - share * n;

        let mut shares = vec![Money(share); parts];
        if let Some(last) = shares.last_mut() {
            last.0 += remainder;
        }
        shares
    }

    /// Split into `parts` shares that sum exactly to `self`, spreading the
    /// remainder one cent per share from the last share backwards
    ///
    /// Unlike [`Money::split_evenly`], an amount of at least `parts` cents
    /// leaves no share at zero, and a smaller amount still lands on as many
    /// shares as it has cents.
    pub fn split_by_cent(self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let n = parts as i64;
        let share = self.0.div_euclid(n);
        let remainder = (self.0 - share * n) as usize;

        (0..parts)
            .map(|i| {
                if i >= parts - remainder {
                    Money(share + 1)
                } else {
                    Money(share)
                }
            })
            .collect()
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let s: String = s.chars().filter(|c| *c != ',').collect();

        let cents = match s.split_once('.') {
            Some((whole, frac)) => {
                let dollars: i64 = whole
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.clone()))?;

                let cents: i64 = match frac.len() {
                    0 => 0,
                    1 => {
                        frac.parse::<i64>()
                            .map_err(|_| MoneyParseError::InvalidFormat(s.clone()))?
                            * 10
                    }
                    2 => frac
                        .parse()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.clone()))?,
                    _ => return Err(MoneyParseError::TooPrecise(s.clone())),
                };

                dollars * 100 + cents
            }
            None => {
                s.parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.clone()))?
                    * 100
            }
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "More than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
