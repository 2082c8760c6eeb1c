//! Monthly plan models
//!
//! `OnboardingAnswers` is what the user tells us; `MonthlyBudgetPlan` is the
//! month-level summary; `PlanRecord` bundles the summary with its calendar
//! and transfer history for storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::calendar::CalendarDay;
use super::category::HabitFrequency;
use super::ids::UserId;
use super::income::IncomeTier;
use super::money::Money;
use super::period::BudgetMonth;
use super::transfer::Transfer;

/// Raw onboarding answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    /// Country or country-state code (e.g., "US-CA")
    pub region: String,

    pub monthly_income: Money,

    #[serde(default)]
    pub additional_income: Option<Money>,

    /// Fixed-expense line items (name -> monthly amount)
    #[serde(default)]
    pub fixed_expenses: BTreeMap<String, Money>,

    #[serde(default)]
    pub savings_goal: Money,

    /// Spending habits per category
    #[serde(default)]
    pub habits: BTreeMap<String, HabitFrequency>,
}

impl OnboardingAnswers {
    /// Monthly income including any additional income
    pub fn total_income(&self) -> Money {
        self.monthly_income + self.additional_income.unwrap_or_default()
    }

    /// Reject negative amounts before any computation
    pub fn validate(&self) -> Result<(), String> {
        if self.monthly_income.is_negative() {
            return Err("monthly income cannot be negative".into());
        }
        if self.additional_income.is_some_and(|a| a.is_negative()) {
            return Err("additional income cannot be negative".into());
        }
        if self.savings_goal.is_negative() {
            return Err("savings goal cannot be negative".into());
        }
        if let Some((name, _)) = self.fixed_expenses.iter().find(|(_, a)| a.is_negative()) {
            return Err(format!("fixed expense '{}' cannot be negative", name));
        }
        Ok(())
    }
}

/// Month-level allocation summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudgetPlan {
    pub total_income: Money,
    pub fixed_total: Money,
    pub discretionary_total: Money,
    /// Savings goal after any deficit trimming
    pub savings_goal: Money,
    /// Monthly amount per discretionary category
    pub category_amounts: BTreeMap<String, Money>,
}

impl MonthlyBudgetPlan {
    /// Sum of the category amounts (may differ from the pool by rounding)
    pub fn allocated_total(&self) -> Money {
        self.category_amounts.values().sum()
    }

    /// fixed + discretionary + savings == income
    pub fn is_balanced(&self) -> bool {
        self.fixed_total + self.discretionary_total + self.savings_goal == self.total_income
    }
}

/// Everything persisted for one (user, month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    pub user_id: UserId,
    pub month: BudgetMonth,
    pub region: String,
    pub tier: IncomeTier,
    pub plan: MonthlyBudgetPlan,
    pub days: Vec<CalendarDay>,

    /// Redistribution history (append-only)
    #[serde(default)]
    pub transfers: Vec<Transfer>,

    pub generated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanRecord {
    pub fn day(&self, date: chrono::NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn day_mut(&mut self, date: chrono::NaiveDate) -> Option<&mut CalendarDay> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    pub fn total_planned(&self) -> Money {
        self.days.iter().map(|d| d.total).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.days.iter().map(|d| d.spent()).sum()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
